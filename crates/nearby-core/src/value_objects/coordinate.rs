//! Geographic coordinate value object

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Latitude is accepted strictly inside this bound (degrees)
pub const MAX_LATITUDE: f64 = 90.0;
/// Longitude is accepted strictly inside this bound (degrees)
pub const MAX_LONGITUDE: f64 = 180.0;

/// A point on the Earth's surface in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    /// Build a coordinate without range checks
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Build a coordinate, rejecting values outside the open ranges
    /// (-90, 90) for latitude and (-180, 180) for longitude.
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        check_axis("lat", latitude, MAX_LATITUDE)?;
        check_axis("lng", longitude, MAX_LONGITUDE)?;
        Ok(Self::new(latitude, longitude))
    }

    /// Parse raw form values as sent by mobile clients
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, DomainError> {
        let lat = parse_axis("lat", latitude)?;
        let lng = parse_axis("lng", longitude)?;
        Self::validated(lat, lng)
    }

    /// Both axes in radians, `(lat, lng)`
    #[inline]
    pub fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

fn parse_axis(field: &'static str, raw: &str) -> Result<f64, DomainError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DomainError::invalid_coordinate(field, "This field is required."));
    }
    raw.parse::<f64>()
        .map_err(|_| DomainError::invalid_coordinate(field, "A valid number is required."))
}

fn check_axis(field: &'static str, value: f64, bound: f64) -> Result<(), DomainError> {
    if !value.is_finite() {
        return Err(DomainError::invalid_coordinate(field, "A valid number is required."));
    }
    if value <= -bound || value >= bound {
        return Err(DomainError::invalid_coordinate(
            field,
            format!("This field must be a value between (-{bound:.2},{bound:.2})."),
        ));
    }
    Ok(())
}
