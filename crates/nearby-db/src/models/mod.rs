//! Database models - SQLx-compatible structs for PostgreSQL tables

mod interaction;
mod location;
mod notification;
mod place;
mod user;

pub use interaction::InteractionModel;
pub use location::LocationModel;
pub use notification::NotificationModel;
pub use place::PlaceModel;
pub use user::UserModel;
