//! Value objects - immutable types that represent domain concepts

mod coordinate;
mod snowflake;

pub use coordinate::{Coordinate, MAX_LATITUDE, MAX_LONGITUDE};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
