//! Place handlers

use axum::{extract::State, Json};
use nearby_service::dto::{CreatePlaceRequest, PlaceResponse, TopPlaceResponse, UpdatePlaceRequest};
use nearby_service::PlaceService;

use crate::extractors::{AuthUser, IdPath, Limit, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /places
pub async fn create_place(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePlaceRequest>,
) -> ApiResult<Created<PlaceResponse>> {
    let service = PlaceService::new(state.service_context());
    let place = service.create_place(auth.user_id, request).await?;
    Ok(Created(place))
}

/// GET /places/{place_id}
pub async fn get_place(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(place_id): IdPath,
) -> ApiResult<Json<PlaceResponse>> {
    let service = PlaceService::new(state.service_context());
    let place = service.get_place(place_id).await?;
    Ok(Json(place))
}

/// Partial update; only the owner may change a place
///
/// PATCH /places/{place_id}
pub async fn update_place(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(place_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdatePlaceRequest>,
) -> ApiResult<Json<PlaceResponse>> {
    let service = PlaceService::new(state.service_context());
    let place = service.update_place(auth.user_id, place_id, request).await?;
    Ok(Json(place))
}

/// GET /users/@me/places
pub async fn get_my_places(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PlaceResponse>>> {
    let service = PlaceService::new(state.service_context());
    let places = service.my_places(auth.user_id).await?;
    Ok(Json(places))
}

/// Places saved by followed users
///
/// GET /places/following
pub async fn get_following_places(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<PlaceResponse>>> {
    let service = PlaceService::new(state.service_context());
    let places = service.following_places(auth.user_id).await?;
    Ok(Json(places))
}

/// The caller's places ranked by recorded visits
///
/// GET /users/@me/top-places
pub async fn get_top_places(
    State(state): State<AppState>,
    auth: AuthUser,
    Limit(limit): Limit,
) -> ApiResult<Json<Vec<TopPlaceResponse>>> {
    let service = PlaceService::new(state.service_context());
    let ranked = service.top_places(auth.user_id, limit).await?;
    Ok(Json(ranked))
}
