//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{health, interactions, locations, notifications, places, users};
use crate::state::AppState;

/// API routes, without health checks
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (kept out of rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(user_routes())
        .merge(location_routes())
        .merge(interaction_routes())
        .merge(place_routes())
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(users::create_user))
        .route("/users/@me", get(users::get_current_user))
        .route("/users/@me/suggestions", get(users::get_suggestions))
        .route("/users/@me/following", get(users::get_following))
        .route("/users/@me/following/:user_id", put(users::follow_user))
        .route("/users/@me/notifications", get(notifications::get_notifications))
        .route("/users/:user_id", get(users::get_user))
}

/// Location routes
fn location_routes() -> Router<AppState> {
    Router::new()
        .route("/locations", post(locations::post_location))
        .route("/locations/following", get(locations::get_following_locations))
        .route("/users/@me/locations", get(locations::get_location_history))
}

/// Interaction and ranking routes
fn interaction_routes() -> Router<AppState> {
    Router::new()
        .route("/interactions", post(interactions::log_interaction))
        .route("/users/@me/top-friends", get(interactions::get_top_friends))
        .route(
            "/users/@me/top-friends/time",
            get(interactions::get_top_friends_by_time),
        )
}

/// Place routes
fn place_routes() -> Router<AppState> {
    Router::new()
        .route("/places", post(places::create_place))
        .route("/places/following", get(places::get_following_places))
        .route(
            "/places/:place_id",
            get(places::get_place).patch(places::update_place),
        )
        .route("/users/@me/places", get(places::get_my_places))
        .route("/users/@me/top-places", get(places::get_top_places))
}
