use crate::value_objects::Coordinate;

/// Earth radius used for every distance in the service
pub const EARTH_RADIUS_KM: f64 = 6367.0;

/// Haversine great-circle distance in kilometres.
///
/// No range checks: coordinates are validated at the edges of the system.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lng1) = a.to_radians();
    let (lat2, lng2) = b.to_radians();

    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}
