//! Place entity <-> model mapper

use nearby_core::entities::Place;
use nearby_core::value_objects::{Coordinate, Snowflake};

use crate::models::PlaceModel;

impl From<PlaceModel> for Place {
    fn from(model: PlaceModel) -> Self {
        Place {
            id: Snowflake::new(model.id),
            owner_id: Snowflake::new(model.owner_id),
            coordinate: Coordinate::new(model.latitude, model.longitude),
            category: model.category,
            description: model.description,
            image: model.image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Column values for inserting or updating a place
pub struct PlaceInsert<'a> {
    pub id: i64,
    pub owner_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub category: &'a str,
    pub description: &'a str,
    pub image: Option<&'a str>,
}

impl<'a> PlaceInsert<'a> {
    pub fn new(place: &'a Place) -> Self {
        Self {
            id: place.id.into_inner(),
            owner_id: place.owner_id.into_inner(),
            latitude: place.coordinate.latitude,
            longitude: place.coordinate.longitude,
            category: &place.category,
            description: &place.description,
            image: place.image.as_deref(),
        }
    }
}
