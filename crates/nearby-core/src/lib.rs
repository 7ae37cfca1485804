//! # nearby-core
//!
//! Domain layer: entities, value objects, repository traits and the pure
//! proximity math (distance, near/together classification, rankings).
//! This crate has no dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod proximity;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    FollowEdge, Gender, Interaction, InteractionKind, LocationRecord, Notification, Place, User,
};
pub use error::DomainError;
pub use proximity::{Classification, Proximity, Sighting, Thresholds};
pub use traits::{
    FollowRepository, InteractionRepository, LocationRepository, NotificationRepository,
    PlaceRepository, RepoResult, UserRepository,
};
pub use value_objects::{Coordinate, Snowflake, SnowflakeGenerator, SnowflakeParseError};
