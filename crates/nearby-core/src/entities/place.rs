//! Place of interest - a spot a user saved (restaurant, bar, library...)

use chrono::{DateTime, Utc};

use crate::value_objects::{Coordinate, Snowflake};

#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id: Snowflake,
    pub owner_id: Snowflake,
    pub coordinate: Coordinate,
    /// Free-form category such as "restaurant" or "library"
    pub category: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Place {
    pub fn new(
        id: Snowflake,
        owner_id: Snowflake,
        coordinate: Coordinate,
        category: String,
        description: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            coordinate,
            category,
            description,
            image: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }

    pub fn set_coordinate(&mut self, coordinate: Coordinate) {
        self.coordinate = coordinate;
        self.updated_at = Utc::now();
    }

    pub fn set_category(&mut self, category: String) {
        self.category = category;
        self.updated_at = Utc::now();
    }

    pub fn set_description(&mut self, description: String) {
        self.description = description;
        self.updated_at = Utc::now();
    }

    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image;
        self.updated_at = Utc::now();
    }
}
