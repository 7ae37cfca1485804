//! Domain entities - core business objects

mod follow;
mod interaction;
mod location;
mod notification;
mod place;
mod user;

pub use follow::FollowEdge;
pub use interaction::{Interaction, InteractionKind};
pub use location::LocationRecord;
pub use notification::Notification;
pub use place::Place;
pub use user::{Gender, User};
