//! Entity to model mappers
//!
//! - `From<Model> for Entity`: convert database rows to domain objects
//! - `*Insert` structs: flatten entities into bindable column values

mod interaction;
mod location;
mod notification;
mod place;
mod user;

pub use interaction::{interaction_kind_to_str, InteractionInsert};
pub use location::LocationInsert;
pub use notification::NotificationInsert;
pub use place::PlaceInsert;
pub use user::UserInsert;
