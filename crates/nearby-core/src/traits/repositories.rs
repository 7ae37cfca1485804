//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; `nearby-db` provides a PostgreSQL
//! and an in-memory implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{Interaction, LocationRecord, Notification, Place, User};
use crate::error::DomainError;
use crate::value_objects::{Coordinate, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find user by phone number
    async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if phone number is already taken
    async fn phone_exists(&self, phone: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Users `user_id` could follow: not themselves, not already followed,
    /// and with a profile picture
    async fn find_suggestions(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Add a follow edge. Returns `false` if it already existed.
    async fn follow(&self, follower_id: Snowflake, followed_id: Snowflake) -> RepoResult<bool>;

    /// Check whether `follower_id` follows `followed_id`
    async fn is_following(&self, follower_id: Snowflake, followed_id: Snowflake)
        -> RepoResult<bool>;

    /// Users followed by `user_id`
    async fn find_followed(&self, user_id: Snowflake) -> RepoResult<Vec<User>>;

    /// Users following `user_id`
    async fn find_followers(&self, user_id: Snowflake) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Location Repository
// ============================================================================

#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Store a new location record
    async fn create(&self, record: &LocationRecord) -> RepoResult<()>;

    /// Current location: the most recently updated record of the user
    async fn find_latest(&self, user_id: Snowflake) -> RepoResult<Option<LocationRecord>>;

    /// Location history, most recently updated first
    async fn find_by_user(&self, user_id: Snowflake, limit: Option<i64>)
        -> RepoResult<Vec<LocationRecord>>;

    /// Refresh `updated_at` of an existing record in place
    async fn touch(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()>;
}

// ============================================================================
// Interaction Repository
// ============================================================================

#[async_trait]
pub trait InteractionRepository: Send + Sync {
    /// The open physical session for the ordered pair, if any
    async fn find_open_physical(
        &self,
        initiator_id: Snowflake,
        partner_id: Snowflake,
    ) -> RepoResult<Option<Interaction>>;

    /// Store a new interaction
    async fn create(&self, interaction: &Interaction) -> RepoResult<()>;

    /// Move an interaction to a new position
    async fn update_location(&self, id: Snowflake, coordinate: Coordinate) -> RepoResult<()>;

    /// Close an open session
    async fn close(&self, id: Snowflake, ended_at: DateTime<Utc>) -> RepoResult<()>;

    /// Every interaction in which the user is initiator or partner
    async fn find_involving(&self, user_id: Snowflake) -> RepoResult<Vec<Interaction>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Most recent notification for the pair created at or after `since`
    async fn find_recent(
        &self,
        notifier_id: Snowflake,
        notified_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Option<Notification>>;

    /// Store a new notification
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Notifications received by `user_id`, newest first
    async fn find_by_notified(&self, user_id: Snowflake, limit: i64)
        -> RepoResult<Vec<Notification>>;
}

// ============================================================================
// Place Repository
// ============================================================================

#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Find place by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Place>>;

    /// Places saved by a user, most recently updated first
    async fn find_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<Place>>;

    /// Places saved by any of the given users, most recently updated first
    async fn find_by_owners(&self, owner_ids: &[Snowflake]) -> RepoResult<Vec<Place>>;

    /// Create a new place
    async fn create(&self, place: &Place) -> RepoResult<()>;

    /// Update an existing place
    async fn update(&self, place: &Place) -> RepoResult<()>;
}
