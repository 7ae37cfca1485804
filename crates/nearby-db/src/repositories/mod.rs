//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in nearby-core.

mod error;
mod follow;
mod interaction;
mod location;
mod notification;
mod place;
mod user;

pub use follow::PgFollowRepository;
pub use interaction::PgInteractionRepository;
pub use location::PgLocationRepository;
pub use notification::PgNotificationRepository;
pub use place::PgPlaceRepository;
pub use user::PgUserRepository;
