//! Location handlers

use axum::{extract::State, Json};
use chrono::Utc;
use nearby_service::dto::{
    FollowingLocationsResponse, LocationResponse, PostLocationRequest, PostLocationResponse,
};
use nearby_service::LocationService;

use crate::extractors::{AuthUser, Limit, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Store the caller's position and report who is nearby
///
/// POST /locations
pub async fn post_location(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<PostLocationRequest>,
) -> ApiResult<Created<PostLocationResponse>> {
    let service = LocationService::new(state.service_context());
    let response = service.post_location(auth.user_id, request, Utc::now()).await?;
    Ok(Created(response))
}

/// GET /locations/following
pub async fn get_following_locations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<FollowingLocationsResponse>> {
    let service = LocationService::new(state.service_context());
    let response = service.followings_locations(auth.user_id, Utc::now()).await?;
    Ok(Json(response))
}

/// GET /users/@me/locations
pub async fn get_location_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Limit(limit): Limit,
) -> ApiResult<Json<Vec<LocationResponse>>> {
    let service = LocationService::new(state.service_context());
    let history = service.history(auth.user_id, limit).await?;
    Ok(Json(history))
}
