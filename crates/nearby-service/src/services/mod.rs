//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and takes the acting
//! user as an explicit argument.

pub mod context;
pub mod error;
pub mod interaction;
pub mod location;
pub mod notification;
pub mod place;
pub mod proximity;
pub mod user;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use interaction::InteractionService;
pub use location::LocationService;
pub use notification::NotificationService;
pub use place::PlaceService;
pub use proximity::{InteractionChanges, ProximityEvaluator, ProximityReport};
pub use user::UserService;
