//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AxisValue, CreatePlaceRequest, CreateUserRequest, InteractionInput, LimitQuery,
    LogInteractionRequest, PartnerRef, PostLocationRequest, UpdatePlaceRequest,
};

pub use responses::{
    FollowResponse, FollowingLocationResponse, FollowingLocationsResponse, HealthChecks,
    HealthResponse, InteractionChangesResponse, InteractionResponse, LocationResponse,
    NearbyResponse, NotificationResponse, PlaceResponse, PostLocationResponse, ReadinessResponse,
    SightingResponse, TopFriendResponse, TopFriendTimeResponse, TopPlaceResponse, UserResponse,
};

pub use mappers::{InteractionWithPartner, LocationWithUser};
