//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use nearby_core::entities::{Interaction, LocationRecord, Notification, Place, User};
use nearby_core::proximity::{FriendScore, FriendTime, PlaceScore};
use nearby_core::Sighting;

use super::responses::{
    FollowingLocationResponse, InteractionResponse, LocationResponse, NotificationResponse,
    PlaceResponse, SightingResponse, TopFriendResponse, TopFriendTimeResponse, TopPlaceResponse,
    UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            gender: user.gender,
            birthday: user.birthday,
            country: user.country.clone(),
            city: user.city.clone(),
            image: user.image.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Location Mappers
// ============================================================================

impl From<&LocationRecord> for LocationResponse {
    fn from(record: &LocationRecord) -> Self {
        Self {
            id: record.id.to_string(),
            user_id: record.user_id.to_string(),
            location: record.coordinate,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// A followed user together with their current location
#[derive(Debug, Clone)]
pub struct LocationWithUser {
    pub user: User,
    pub location: LocationRecord,
}

impl From<&LocationWithUser> for FollowingLocationResponse {
    fn from(value: &LocationWithUser) -> Self {
        Self {
            user: UserResponse::from(&value.user),
            location: value.location.coordinate,
            updated_at: value.location.updated_at,
        }
    }
}

impl From<&Sighting> for SightingResponse {
    fn from(sighting: &Sighting) -> Self {
        Self {
            user_id: sighting.user_id.to_string(),
            location: sighting.coordinate,
            distance_km: sighting.distance_km,
            proximity: sighting.proximity,
        }
    }
}

// ============================================================================
// Interaction Mappers
// ============================================================================

/// An interaction with the partner's profile resolved
#[derive(Debug, Clone)]
pub struct InteractionWithPartner {
    pub interaction: Interaction,
    pub partner: User,
}

impl From<&InteractionWithPartner> for InteractionResponse {
    fn from(value: &InteractionWithPartner) -> Self {
        let i = &value.interaction;
        Self {
            id: i.id.to_string(),
            kind: i.kind,
            user_id: i.initiator_id.to_string(),
            partner: UserResponse::from(&value.partner),
            location: i.coordinate,
            started_at: i.started_at,
            ended_at: i.ended_at,
        }
    }
}

impl From<(&FriendScore, &User)> for TopFriendResponse {
    fn from((score, user): (&FriendScore, &User)) -> Self {
        Self {
            user: UserResponse::from(user),
            interactions: score.interactions,
        }
    }
}

impl From<(&FriendTime, &User)> for TopFriendTimeResponse {
    fn from((time, user): (&FriendTime, &User)) -> Self {
        Self {
            user: UserResponse::from(user),
            seconds_together: time.time_together.num_seconds(),
        }
    }
}

// ============================================================================
// Place Mappers
// ============================================================================

impl From<&Place> for PlaceResponse {
    fn from(place: &Place) -> Self {
        Self {
            id: place.id.to_string(),
            owner_id: place.owner_id.to_string(),
            category: place.category.clone(),
            description: place.description.clone(),
            image: place.image.clone(),
            location: place.coordinate,
            created_at: place.created_at,
            updated_at: place.updated_at,
        }
    }
}

impl From<Place> for PlaceResponse {
    fn from(place: Place) -> Self {
        Self::from(&place)
    }
}

impl From<&PlaceScore> for TopPlaceResponse {
    fn from(score: &PlaceScore) -> Self {
        Self {
            place: PlaceResponse::from(&score.place),
            visits: score.visits,
        }
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<&Notification> for NotificationResponse {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            notifier_id: n.notifier_id.to_string(),
            notified_id: n.notified_id.to_string(),
            created_at: n.created_at,
        }
    }
}
