//! Location record <-> model mapper

use nearby_core::entities::LocationRecord;
use nearby_core::value_objects::{Coordinate, Snowflake};

use crate::models::LocationModel;

impl From<LocationModel> for LocationRecord {
    fn from(model: LocationModel) -> Self {
        LocationRecord {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            coordinate: Coordinate::new(model.latitude, model.longitude),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Column values for inserting a location record
pub struct LocationInsert {
    pub id: i64,
    pub user_id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationInsert {
    pub fn new(record: &LocationRecord) -> Self {
        Self {
            id: record.id.into_inner(),
            user_id: record.user_id.into_inner(),
            latitude: record.coordinate.latitude,
            longitude: record.coordinate.longitude,
        }
    }
}
