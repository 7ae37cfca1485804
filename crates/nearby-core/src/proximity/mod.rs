//! Proximity math - great-circle distance, near/together classification and
//! the rankings built on top of them.
//!
//! Everything here is pure: callers load records from the repositories and
//! pass them in.

mod classify;
mod distance;
pub mod ranking;

pub use classify::{classify, Classification, Proximity, Sighting, Thresholds};
pub use distance::{distance_km, EARTH_RADIUS_KM};
pub use ranking::{
    rank_by_interaction_count, rank_by_time_together, rank_places_by_proximity, FriendScore,
    FriendTime, PlaceScore,
};
