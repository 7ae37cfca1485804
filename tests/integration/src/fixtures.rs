//! Test fixtures and data generators
//!
//! Request bodies and the subset of response fields the tests look at.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique suffix, also across runs against a shared database
pub fn unique_suffix() -> u64 {
    let seed = (Utc::now().timestamp_micros() as u64) % 1_000_000_000;
    seed * 1000 + COUNTER.fetch_add(1, Ordering::SeqCst) % 1000
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub country: String,
    pub city: String,
    pub image: Option<String>,
}

impl CreateUserRequest {
    pub fn unique(name: &str) -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("{name}{suffix}@example.com"),
            first_name: name.to_string(),
            last_name: "Tester".to_string(),
            phone: format!("+{}", suffix % 100_000_000_000_000),
            country: "Serbia".to_string(),
            city: "Belgrade".to_string(),
            image: Some(format!("avatars/{name}.png")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationRequest {
    pub lat: f64,
    pub lng: f64,
}

impl LocationRequest {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaceRequest {
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub category: String,
    pub description: String,
}

impl CreatePlaceRequest {
    pub fn new(lat: f64, lng: f64, category: &str) -> Self {
        Self {
            lat,
            lng,
            category: category.to_string(),
            description: format!("A {category} worth visiting"),
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct FollowResponse {
    pub following: UserResponse,
    pub created: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct LocationResponse {
    pub id: String,
    pub user_id: String,
    pub location: Coordinate,
}

#[derive(Debug, Deserialize)]
pub struct FollowingLocation {
    pub user: UserResponse,
    pub location: Coordinate,
}

#[derive(Debug, Deserialize)]
pub struct FollowingLocationsResponse {
    pub followings_locations: Vec<FollowingLocation>,
}

#[derive(Debug, Deserialize)]
pub struct Sighting {
    pub user_id: String,
    pub distance_km: f64,
    pub proximity: String,
}

#[derive(Debug, Deserialize)]
pub struct InteractionChanges {
    pub opened: Vec<String>,
    pub refreshed: Vec<String>,
    pub closed: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct Nearby {
    pub any_near: bool,
    pub near: Vec<Sighting>,
    pub notified: Vec<String>,
    pub interactions: InteractionChanges,
}

#[derive(Debug, Deserialize)]
pub struct PostLocationResponse {
    pub user_location: LocationResponse,
    pub followings_locations: Vec<FollowingLocation>,
    pub nearby: Nearby,
}

#[derive(Debug, Deserialize)]
pub struct InteractionResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub partner: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct TopFriendResponse {
    pub user: UserResponse,
    pub interactions: usize,
}

#[derive(Debug, Deserialize)]
pub struct NotificationResponse {
    pub notifier_id: String,
    pub notified_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceResponse {
    pub id: String,
    pub owner_id: String,
    #[serde(rename = "type")]
    pub category: String,
    pub description: String,
    pub location: Coordinate,
}

#[derive(Debug, Deserialize)]
pub struct TopPlaceResponse {
    pub place: PlaceResponse,
    pub visits: usize,
}
