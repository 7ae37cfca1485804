//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, NaiveDate, Utc};
use nearby_core::{Coordinate, Gender, InteractionKind, Proximity};
use serde::Serialize;

// ============================================================================
// User Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    pub country: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Result of a follow request
#[derive(Debug, Clone, Serialize)]
pub struct FollowResponse {
    pub user: UserResponse,
    pub following: UserResponse,
    /// False when the edge already existed
    pub created: bool,
}

// ============================================================================
// Location Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LocationResponse {
    pub id: String,
    pub user_id: String,
    pub location: Coordinate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A followed user's current location
#[derive(Debug, Clone, Serialize)]
pub struct FollowingLocationResponse {
    pub user: UserResponse,
    pub location: Coordinate,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowingLocationsResponse {
    pub followings_locations: Vec<FollowingLocationResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SightingResponse {
    pub user_id: String,
    pub location: Coordinate,
    pub distance_km: f64,
    pub proximity: Proximity,
}

/// Partner ids whose session was opened, refreshed or closed
#[derive(Debug, Clone, Default, Serialize)]
pub struct InteractionChangesResponse {
    pub opened: Vec<String>,
    pub refreshed: Vec<String>,
    pub closed: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NearbyResponse {
    pub any_near: bool,
    /// Followed users within the near band, closest first
    pub near: Vec<SightingResponse>,
    /// Followed users notified by this post
    pub notified: Vec<String>,
    pub interactions: InteractionChangesResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostLocationResponse {
    pub user_location: LocationResponse,
    pub followings_locations: Vec<FollowingLocationResponse>,
    pub nearby: NearbyResponse,
}

// ============================================================================
// Interaction Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct InteractionResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    pub user_id: String,
    pub partner: UserResponse,
    pub location: Coordinate,
    pub started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopFriendResponse {
    pub user: UserResponse,
    pub interactions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopFriendTimeResponse {
    pub user: UserResponse,
    pub seconds_together: i64,
}

// ============================================================================
// Place Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PlaceResponse {
    pub id: String,
    pub owner_id: String,
    #[serde(rename = "type")]
    pub category: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub location: Coordinate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopPlaceResponse {
    pub place: PlaceResponse,
    pub visits: usize,
}

// ============================================================================
// Notification Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub notifier_id: String,
    pub notified_id: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    /// "healthy", "unhealthy" or "in_memory"
    pub database: String,
}

impl ReadinessResponse {
    /// `None` means no database is configured
    pub fn ready(database_healthy: Option<bool>) -> Self {
        let (ready, database) = match database_healthy {
            Some(true) => (true, "healthy"),
            Some(false) => (false, "unhealthy"),
            None => (true, "in_memory"),
        };
        Self {
            status: if ready { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: database.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response() {
        assert_eq!(HealthResponse::healthy().status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        assert!(ReadinessResponse::ready(Some(true)).is_ready());
        assert!(!ReadinessResponse::ready(Some(false)).is_ready());

        let memory = ReadinessResponse::ready(None);
        assert!(memory.is_ready());
        assert_eq!(memory.checks.database, "in_memory");
    }

    #[test]
    fn test_place_serializes_type() {
        let place = PlaceResponse {
            id: "1".to_string(),
            owner_id: "2".to_string(),
            category: "cafe".to_string(),
            description: "Corner table".to_string(),
            image: None,
            location: Coordinate::new(44.8, 20.4),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&place).unwrap();
        assert_eq!(json["type"], "cafe");
        assert_eq!(json["location"]["lat"], 44.8);
        assert!(json.get("image").is_none());
    }
}
