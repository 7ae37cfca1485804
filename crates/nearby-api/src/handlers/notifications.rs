//! Notification handlers

use axum::{extract::State, Json};
use nearby_service::dto::NotificationResponse;
use nearby_service::NotificationService;

use crate::extractors::{AuthUser, Limit};
use crate::response::ApiResult;
use crate::state::AppState;

/// Nearby notifications about the current user, newest first
///
/// GET /users/@me/notifications
pub async fn get_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    Limit(limit): Limit,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    let notifications = service.received(auth.user_id, limit).await?;
    Ok(Json(notifications))
}
