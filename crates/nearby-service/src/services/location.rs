//! Location service
//!
//! Stores posted locations and answers "where are the people I follow".

use chrono::{DateTime, Utc};
use nearby_core::entities::{LocationRecord, User};
use nearby_core::Snowflake;
use tracing::{debug, info, instrument};

use crate::dto::{
    FollowingLocationResponse, FollowingLocationsResponse, InteractionChangesResponse,
    LocationResponse, LocationWithUser, NearbyResponse, PostLocationRequest,
    PostLocationResponse, SightingResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::proximity::{ProximityEvaluator, ProximityReport};

pub struct LocationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LocationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Store the user's location and evaluate proximity to followed users.
    ///
    /// Posting the coordinate the user is already at refreshes that record
    /// instead of adding a new one.
    #[instrument(skip(self, request))]
    pub async fn post_location(
        &self,
        user_id: Snowflake,
        request: PostLocationRequest,
        at: DateTime<Utc>,
    ) -> ServiceResult<PostLocationResponse> {
        let coordinate = request.coordinate()?;
        self.require_user(user_id).await?;

        let repo = self.ctx.location_repo();
        let record = match repo.find_latest(user_id).await? {
            Some(mut current) if current.coordinate == coordinate => {
                repo.touch(current.id, at).await?;
                current.updated_at = at;
                debug!(user_id = %user_id, "Location unchanged, refreshed");
                current
            }
            _ => {
                let record = LocationRecord::new(self.ctx.generate_id(), user_id, coordinate, at);
                repo.create(&record).await?;
                info!(user_id = %user_id, location_id = %record.id, "Location stored");
                record
            }
        };

        let report = ProximityEvaluator::new(self.ctx)
            .evaluate(user_id, coordinate, at)
            .await?;
        let followings = self.fresh_followings(user_id, at).await?;

        Ok(PostLocationResponse {
            user_location: LocationResponse::from(&record),
            followings_locations: followings.iter().map(FollowingLocationResponse::from).collect(),
            nearby: nearby_response(&report),
        })
    }

    /// Current locations of followed users, if updated within the freshness
    /// window
    #[instrument(skip(self))]
    pub async fn followings_locations(
        &self,
        user_id: Snowflake,
        at: DateTime<Utc>,
    ) -> ServiceResult<FollowingLocationsResponse> {
        let followings = self.fresh_followings(user_id, at).await?;
        Ok(FollowingLocationsResponse {
            followings_locations: followings.iter().map(FollowingLocationResponse::from).collect(),
        })
    }

    /// The user's own locations, most recently updated first
    #[instrument(skip(self))]
    pub async fn history(
        &self,
        user_id: Snowflake,
        limit: Option<u32>,
    ) -> ServiceResult<Vec<LocationResponse>> {
        let records = self
            .ctx
            .location_repo()
            .find_by_user(user_id, limit.map(i64::from))
            .await?;
        Ok(records.iter().map(LocationResponse::from).collect())
    }

    async fn fresh_followings(
        &self,
        user_id: Snowflake,
        at: DateTime<Utc>,
    ) -> ServiceResult<Vec<LocationWithUser>> {
        let window = self.ctx.proximity().location_freshness();
        let followed: Vec<User> = self.ctx.follow_repo().find_followed(user_id).await?;

        let mut fresh = Vec::with_capacity(followed.len());
        for user in followed {
            if let Some(location) = self.ctx.location_repo().find_latest(user.id).await? {
                if location.is_fresh(at, window) {
                    fresh.push(LocationWithUser { user, location });
                }
            }
        }
        Ok(fresh)
    }

    async fn require_user(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }
}

fn nearby_response(report: &ProximityReport) -> NearbyResponse {
    let ids = |ids: &[Snowflake]| ids.iter().map(ToString::to_string).collect::<Vec<_>>();
    NearbyResponse {
        any_near: report.any_near(),
        near: report
            .classification
            .near()
            .map(SightingResponse::from)
            .collect(),
        notified: ids(&report.notified),
        interactions: InteractionChangesResponse {
            opened: ids(&report.interactions.opened),
            refreshed: ids(&report.interactions.refreshed),
            closed: ids(&report.interactions.closed),
        },
    }
}
