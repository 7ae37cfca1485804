//! Proximity evaluation
//!
//! Runs after every location post:
//! 1. classify the poster against the last known location of each followed user
//! 2. open, refresh or close physical sessions for the "together" band
//! 3. notify the poster about followed users in the "near" band, at most once
//!    per pair within the cooldown

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use nearby_core::entities::{Interaction, InteractionKind, Notification};
use nearby_core::proximity::classify;
use nearby_core::{Classification, Coordinate, DomainError, Snowflake};
use tracing::{debug, info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Partners whose physical session changed state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionChanges {
    pub opened: Vec<Snowflake>,
    pub refreshed: Vec<Snowflake>,
    pub closed: Vec<Snowflake>,
}

impl InteractionChanges {
    pub fn is_empty(&self) -> bool {
        self.opened.is_empty() && self.refreshed.is_empty() && self.closed.is_empty()
    }
}

/// Everything one location post caused
#[derive(Debug, Clone, Default)]
pub struct ProximityReport {
    pub classification: Classification,
    pub interactions: InteractionChanges,
    /// Near partners a notification was written for
    pub notified: Vec<Snowflake>,
}

impl ProximityReport {
    pub fn any_near(&self) -> bool {
        self.classification.any_near()
    }
}

pub struct ProximityEvaluator<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProximityEvaluator<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Classify the current location of every followed user against `origin`.
    /// Followed users that never posted a location are skipped.
    #[instrument(skip(self))]
    pub async fn sightings(
        &self,
        user_id: Snowflake,
        origin: Coordinate,
    ) -> ServiceResult<Classification> {
        let followed = self.ctx.follow_repo().find_followed(user_id).await?;

        let mut latest = Vec::with_capacity(followed.len());
        for user in &followed {
            match self.ctx.location_repo().find_latest(user.id).await? {
                Some(record) => latest.push(record),
                None => debug!(followed_id = %user.id, "Followed user has no location yet"),
            }
        }

        Ok(classify(origin, &latest, &self.ctx.proximity().thresholds()))
    }

    /// Advance the physical session of each `(user_id, partner)` pair:
    /// together without a session opens one, together with a session moves it
    /// to `origin`, apart with a session closes it at `at`.
    #[instrument(skip(self, classification))]
    pub async fn record_together_interactions(
        &self,
        user_id: Snowflake,
        classification: &Classification,
        origin: Coordinate,
        at: DateTime<Utc>,
    ) -> ServiceResult<InteractionChanges> {
        let repo = self.ctx.interaction_repo();
        let mut changes = InteractionChanges::default();

        for sighting in classification.sightings() {
            let partner = sighting.user_id;
            let open = repo.find_open_physical(user_id, partner).await?;

            match (open, sighting.proximity.is_together()) {
                (None, true) => {
                    let session = Interaction::new(
                        self.ctx.generate_id(),
                        user_id,
                        partner,
                        origin,
                        InteractionKind::Physical,
                        at,
                    );
                    match repo.create(&session).await {
                        Ok(()) => changes.opened.push(partner),
                        // Another post for the same pair won the race
                        Err(DomainError::InteractionAlreadyOpen) => {
                            debug!(partner_id = %partner, "Session already open");
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                (Some(session), true) => {
                    repo.update_location(session.id, origin).await?;
                    changes.refreshed.push(partner);
                }
                (Some(session), false) => {
                    repo.close(session.id, at).await?;
                    changes.closed.push(partner);
                }
                (None, false) => {}
            }
        }

        if !changes.is_empty() {
            info!(
                user_id = %user_id,
                opened = changes.opened.len(),
                refreshed = changes.refreshed.len(),
                closed = changes.closed.len(),
                "Physical sessions updated"
            );
        }

        Ok(changes)
    }

    /// Write a notification for each partner not already notified within the
    /// cooldown. Returns the partners notified now, in input order.
    #[instrument(skip(self, partners))]
    pub async fn notify_if_due(
        &self,
        notifier_id: Snowflake,
        partners: &[Snowflake],
        at: DateTime<Utc>,
    ) -> ServiceResult<Vec<Snowflake>> {
        let since = at - self.ctx.proximity().notification_cooldown();
        let repo = self.ctx.notification_repo();

        let mut seen = HashSet::with_capacity(partners.len());
        let mut notified = Vec::new();

        for &partner in partners {
            if !seen.insert(partner) {
                continue;
            }
            if repo.find_recent(notifier_id, partner, since).await?.is_some() {
                debug!(partner_id = %partner, "Notification cooldown active");
                continue;
            }

            let notification = Notification::new(self.ctx.generate_id(), notifier_id, partner, at);
            repo.create(&notification).await?;
            notified.push(partner);
        }

        Ok(notified)
    }

    /// Classify, update sessions and notify in one pass
    #[instrument(skip(self))]
    pub async fn evaluate(
        &self,
        user_id: Snowflake,
        origin: Coordinate,
        at: DateTime<Utc>,
    ) -> ServiceResult<ProximityReport> {
        let classification = self.sightings(user_id, origin).await?;
        let interactions = self
            .record_together_interactions(user_id, &classification, origin, at)
            .await?;

        let near: Vec<Snowflake> = classification.near().map(|s| s.user_id).collect();
        let notified = self.notify_if_due(user_id, &near, at).await?;

        info!(
            user_id = %user_id,
            followed_located = classification.len(),
            near = near.len(),
            notified = notified.len(),
            "Proximity evaluated"
        );

        Ok(ProximityReport {
            classification,
            interactions,
            notified,
        })
    }
}
