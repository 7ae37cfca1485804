//! User service
//!
//! Handles profiles and the follow graph.

use chrono::Utc;
use nearby_core::entities::User;
use nearby_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CreateUserRequest, FollowResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Suggestions returned when the caller gives no limit
const DEFAULT_SUGGESTIONS: i64 = 50;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a profile. Email and phone must be unused.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create_user(&self, request: CreateUserRequest) -> ServiceResult<UserResponse> {
        let email = normalize_email(&request.email);
        let phone = request.phone.trim().to_string();

        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.user_repo().phone_exists(&phone).await? {
            return Err(DomainError::PhoneAlreadyExists.into());
        }

        let user = User {
            id: self.ctx.generate_id(),
            email,
            first_name: request.first_name,
            last_name: request.last_name,
            phone,
            gender: request.gender,
            birthday: request.birthday,
            country: request.country,
            city: request.city,
            image: request.image.filter(|i| !i.trim().is_empty()),
            created_at: Utc::now(),
        };
        self.ctx.user_repo().create(&user).await?;

        info!(user_id = %user.id, "User created");
        Ok(UserResponse::from(&user))
    }

    /// Get user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<UserResponse> {
        Ok(UserResponse::from(&self.get_user_entity(user_id).await?))
    }

    /// Get user entity by ID
    #[instrument(skip(self))]
    pub async fn get_user_entity(&self, user_id: Snowflake) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// People the user might want to follow: everyone with a picture the
    /// user does not follow yet
    #[instrument(skip(self))]
    pub async fn suggestions(
        &self,
        user_id: Snowflake,
        limit: Option<u32>,
    ) -> ServiceResult<Vec<UserResponse>> {
        let limit = limit.map_or(DEFAULT_SUGGESTIONS, i64::from);
        let users = self.ctx.user_repo().find_suggestions(user_id, limit).await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Follow another user. Following twice is a no-op.
    #[instrument(skip(self))]
    pub async fn follow(
        &self,
        user_id: Snowflake,
        target_id: Snowflake,
    ) -> ServiceResult<FollowResponse> {
        if user_id == target_id {
            return Err(DomainError::CannotFollowSelf.into());
        }

        let user = self.get_user_entity(user_id).await?;
        let target = self.get_user_entity(target_id).await?;

        let created = self.ctx.follow_repo().follow(user_id, target_id).await?;
        if created {
            info!(user_id = %user_id, followed_id = %target_id, "User followed");
        }

        Ok(FollowResponse {
            user: UserResponse::from(&user),
            following: UserResponse::from(&target),
            created,
        })
    }

    /// Users the user follows
    #[instrument(skip(self))]
    pub async fn following(&self, user_id: Snowflake) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.follow_repo().find_followed(user_id).await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }
}

/// Lowercase the domain part, keep the local part as typed
fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}
