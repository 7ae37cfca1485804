//! Repository traits (ports)

mod repositories;

pub use repositories::{
    FollowRepository, InteractionRepository, LocationRepository, NotificationRepository,
    PlaceRepository, RepoResult, UserRepository,
};
