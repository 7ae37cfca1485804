//! Interaction handlers
//!
//! Manual interaction logging and friend rankings.

use axum::{extract::State, Json};
use chrono::Utc;
use nearby_service::dto::{
    InteractionResponse, LogInteractionRequest, TopFriendResponse, TopFriendTimeResponse,
};
use nearby_service::InteractionService;

use crate::extractors::{AuthUser, Limit, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Log a call, SMS or physical meeting
///
/// POST /interactions
pub async fn log_interaction(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<LogInteractionRequest>,
) -> ApiResult<Created<InteractionResponse>> {
    let service = InteractionService::new(state.service_context());
    let response = service
        .log_interaction(auth.user_id, request, Utc::now())
        .await?;
    Ok(Created(response))
}

/// GET /users/@me/top-friends
pub async fn get_top_friends(
    State(state): State<AppState>,
    auth: AuthUser,
    Limit(limit): Limit,
) -> ApiResult<Json<Vec<TopFriendResponse>>> {
    let service = InteractionService::new(state.service_context());
    let ranked = service.top_friends(auth.user_id, limit).await?;
    Ok(Json(ranked))
}

/// GET /users/@me/top-friends/time
pub async fn get_top_friends_by_time(
    State(state): State<AppState>,
    auth: AuthUser,
    Limit(limit): Limit,
) -> ApiResult<Json<Vec<TopFriendTimeResponse>>> {
    let service = InteractionService::new(state.service_context());
    let ranked = service.top_friends_by_time(auth.user_id, limit).await?;
    Ok(Json(ranked))
}
