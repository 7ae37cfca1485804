//! User handlers
//!
//! Profiles and the follow graph.

use axum::{extract::State, Json};
use nearby_service::dto::{CreateUserRequest, FollowResponse, UserResponse};
use nearby_service::UserService;

use crate::extractors::{AuthUser, IdPath, Limit, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a profile
///
/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Created<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.create_user(request).await?;
    Ok(Created(response))
}

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(auth.user_id).await?;
    Ok(Json(response))
}

/// Get user by ID
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_user(user_id).await?;
    Ok(Json(response))
}

/// People the current user might follow
///
/// GET /users/@me/suggestions
pub async fn get_suggestions(
    State(state): State<AppState>,
    auth: AuthUser,
    Limit(limit): Limit,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let users = service.suggestions(auth.user_id, limit).await?;
    Ok(Json(users))
}

/// GET /users/@me/following
pub async fn get_following(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let users = service.following(auth.user_id).await?;
    Ok(Json(users))
}

/// Follow a user. Repeating the request is harmless.
///
/// PUT /users/@me/following/{user_id}
pub async fn follow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(target_id): IdPath,
) -> ApiResult<Json<FollowResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.follow(auth.user_id, target_id).await?;
    Ok(Json(response))
}
