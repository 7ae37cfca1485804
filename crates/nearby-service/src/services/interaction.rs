//! Interaction service
//!
//! Manual interaction logging and friend rankings.

use chrono::{DateTime, Utc};
use nearby_core::entities::{Interaction, InteractionKind, User};
use nearby_core::proximity::{rank_by_interaction_count, rank_by_time_together};
use nearby_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    InteractionResponse, InteractionWithPartner, LogInteractionRequest, PartnerRef,
    TopFriendResponse, TopFriendTimeResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct InteractionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InteractionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Log a call, SMS or physical meeting with a followed user.
    ///
    /// A physical meeting with a session already open for the pair moves
    /// that session instead of opening a second one.
    #[instrument(skip(self, request))]
    pub async fn log_interaction(
        &self,
        user_id: Snowflake,
        request: LogInteractionRequest,
        at: DateTime<Utc>,
    ) -> ServiceResult<InteractionResponse> {
        let input = request.parse()?;
        let partner = self.followed_partner(user_id, &input.partner).await?;
        let repo = self.ctx.interaction_repo();

        let open = if input.kind == InteractionKind::Physical {
            repo.find_open_physical(user_id, partner.id).await?
        } else {
            None
        };

        let interaction = match open {
            Some(mut session) => {
                repo.update_location(session.id, input.coordinate).await?;
                session.refresh_location(input.coordinate);
                info!(user_id = %user_id, interaction_id = %session.id, "Physical session refreshed");
                session
            }
            None => {
                let interaction = Interaction::new(
                    self.ctx.generate_id(),
                    user_id,
                    partner.id,
                    input.coordinate,
                    input.kind,
                    at,
                );
                repo.create(&interaction).await?;
                info!(
                    user_id = %user_id,
                    partner_id = %partner.id,
                    kind = %input.kind,
                    "Interaction logged"
                );
                interaction
            }
        };

        Ok(InteractionResponse::from(&InteractionWithPartner {
            interaction,
            partner,
        }))
    }

    /// Users the user interacted with most, any kind, either direction
    #[instrument(skip(self))]
    pub async fn top_friends(
        &self,
        user_id: Snowflake,
        limit: Option<u32>,
    ) -> ServiceResult<Vec<TopFriendResponse>> {
        let interactions = self.ctx.interaction_repo().find_involving(user_id).await?;
        let ranked = rank_by_interaction_count(user_id, &interactions, limit.map(|l| l as usize));

        let mut response = Vec::with_capacity(ranked.len());
        for score in &ranked {
            if let Some(user) = self.ctx.user_repo().find_by_id(score.user_id).await? {
                response.push(TopFriendResponse::from((score, &user)));
            }
        }
        Ok(response)
    }

    /// Users the user spent the most time with in closed physical sessions
    #[instrument(skip(self))]
    pub async fn top_friends_by_time(
        &self,
        user_id: Snowflake,
        limit: Option<u32>,
    ) -> ServiceResult<Vec<TopFriendTimeResponse>> {
        let interactions = self.ctx.interaction_repo().find_involving(user_id).await?;
        let ranked = rank_by_time_together(user_id, &interactions, limit.map(|l| l as usize));

        let mut response = Vec::with_capacity(ranked.len());
        for time in &ranked {
            if let Some(user) = self.ctx.user_repo().find_by_id(time.user_id).await? {
                response.push(TopFriendTimeResponse::from((time, &user)));
            }
        }
        Ok(response)
    }

    /// Resolve the partner among the users `user_id` follows
    async fn followed_partner(&self, user_id: Snowflake, partner: &PartnerRef) -> ServiceResult<User> {
        let users = self.ctx.user_repo();
        let found = match partner {
            PartnerRef::Email(email) => users.find_by_email(email).await?,
            PartnerRef::Phone(phone) => users.find_by_phone(phone).await?,
        };

        let Some(user) = found else {
            return Err(DomainError::PartnerNotFollowed.into());
        };
        if !self.ctx.follow_repo().is_following(user_id, user.id).await? {
            return Err(DomainError::PartnerNotFollowed.into());
        }
        Ok(user)
    }
}
