//! API Integration Tests
//!
//! Runs against the in-memory store unless `DATABASE_URL` is set.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

/// Register a user and return it with a token
async fn register(server: &TestServer, name: &str) -> (UserResponse, String) {
    let response = server
        .post("/api/v1/users", &CreateUserRequest::unique(name))
        .await
        .unwrap();
    let user: UserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let token = server.token_for(&user.id).unwrap();
    (user, token)
}

async fn follow(server: &TestServer, token: &str, target: &UserResponse) {
    let response = server
        .put_auth(&format!("/api/v1/users/@me/following/{}", target.id), token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

async fn post_location(
    server: &TestServer,
    token: &str,
    lat: f64,
    lng: f64,
) -> PostLocationResponse {
    let response = server
        .post_auth("/api/v1/locations", token, &LocationRequest::new(lat, lng))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_create_user_and_fetch_profile() {
    let server = TestServer::start().await.unwrap();
    let (user, token) = register(&server, "ana").await;

    let response = server.get_auth("/api/v1/users/@me", &token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, user.id);

    let response = server
        .get_auth(&format!("/api/v1/users/{}", user.id), &token)
        .await
        .unwrap();
    let fetched: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.email, user.email);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let server = TestServer::start().await.unwrap();
    let request = CreateUserRequest::unique("dup");
    server.post("/api/v1/users", &request).await.unwrap();

    let mut again = CreateUserRequest::unique("dup");
    again.email = request.email.clone();
    let response = server.post("/api/v1/users", &again).await.unwrap();
    assert_error(response, StatusCode::CONFLICT, "EMAIL_ALREADY_EXISTS")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalid_email_has_field_details() {
    let server = TestServer::start().await.unwrap();
    let mut request = CreateUserRequest::unique("bad");
    request.email = "not-an-email".to_string();

    let response = server.post("/api/v1/users", &request).await.unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();
    assert_eq!(error["details"]["email"][0], "Enter a valid email address.");
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    let server = TestServer::start().await.unwrap();

    let response = server.get("/api/v1/users/@me").await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "MISSING_AUTHORIZATION")
        .await
        .unwrap();

    let response = server
        .get_auth("/api/v1/users/@me", "garbage")
        .await
        .unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_TOKEN")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_follow_and_suggestions() {
    let server = TestServer::start().await.unwrap();
    let (_, token) = register(&server, "fan").await;
    let (idol, _) = register(&server, "idol").await;

    let response = server
        .put_auth(&format!("/api/v1/users/@me/following/{}", idol.id), &token)
        .await
        .unwrap();
    let first: FollowResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(first.created);
    assert_eq!(first.following.id, idol.id);

    let response = server
        .put_auth(&format!("/api/v1/users/@me/following/{}", idol.id), &token)
        .await
        .unwrap();
    let second: FollowResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!second.created);

    let response = server
        .get_auth("/api/v1/users/@me/following", &token)
        .await
        .unwrap();
    let following: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(following.len(), 1);

    let response = server
        .get_auth("/api/v1/users/@me/suggestions?limit=100", &token)
        .await
        .unwrap();
    let suggestions: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(suggestions.iter().all(|u| u.id != idol.id));
}

#[tokio::test]
async fn test_follow_rejects_self_and_bad_ids() {
    let server = TestServer::start().await.unwrap();
    let (me, token) = register(&server, "solo").await;

    let response = server
        .put_auth(&format!("/api/v1/users/@me/following/{}", me.id), &token)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "CANNOT_FOLLOW_SELF")
        .await
        .unwrap();

    let response = server
        .put_auth("/api/v1/users/@me/following/not-a-number", &token)
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_PATH_PARAMETER")
        .await
        .unwrap();

    let response = server
        .put_auth("/api/v1/users/@me/following/12345", &token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Location and Proximity Tests
// ============================================================================

#[tokio::test]
async fn test_posting_location_reports_nearby_friend() {
    let server = TestServer::start().await.unwrap();
    let (me, my_token) = register(&server, "walker").await;
    let (friend, friend_token) = register(&server, "sitter").await;
    follow(&server, &my_token, &friend).await;

    post_location(&server, &friend_token, 44.8100, 20.4600).await;

    // About 70 m away: together
    let first = post_location(&server, &my_token, 44.8105, 20.4605).await;
    assert_eq!(first.user_location.user_id, me.id);
    assert!(first.nearby.any_near);
    assert_eq!(first.nearby.near.len(), 1);
    assert_eq!(first.nearby.near[0].user_id, friend.id);
    assert_eq!(first.nearby.near[0].proximity, "together");
    assert!(first.nearby.near[0].distance_km < 0.2);
    assert_eq!(first.nearby.notified, vec![friend.id.clone()]);
    assert_eq!(first.nearby.interactions.opened, vec![friend.id.clone()]);
    assert_eq!(first.followings_locations.len(), 1);

    // Still together: the session is refreshed and the cooldown holds
    let second = post_location(&server, &my_token, 44.8106, 20.4605).await;
    assert!(second.nearby.notified.is_empty());
    assert_eq!(second.nearby.interactions.refreshed, vec![friend.id.clone()]);

    // About 11 km away: the session closes
    let third = post_location(&server, &my_token, 44.9106, 20.4605).await;
    assert!(!third.nearby.any_near);
    assert_eq!(third.nearby.interactions.closed, vec![friend.id.clone()]);

    let response = server
        .get_auth("/api/v1/users/@me/notifications", &friend_token)
        .await
        .unwrap();
    let notifications: Vec<NotificationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].notifier_id, me.id);
    assert_eq!(notifications[0].notified_id, friend.id);

    let response = server
        .get_auth("/api/v1/users/@me/locations", &my_token)
        .await
        .unwrap();
    let history: Vec<LocationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].location, Coordinate { lat: 44.9106, lng: 20.4605 });

    let response = server
        .get_auth("/api/v1/users/@me/top-friends/time", &my_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_following_locations() {
    let server = TestServer::start().await.unwrap();
    let (_, my_token) = register(&server, "watcher").await;
    let (friend, friend_token) = register(&server, "mover").await;
    follow(&server, &my_token, &friend).await;

    post_location(&server, &friend_token, 10.0, 10.0).await;

    let response = server
        .get_auth("/api/v1/locations/following", &my_token)
        .await
        .unwrap();
    let listed: FollowingLocationsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.followings_locations.len(), 1);
    assert_eq!(listed.followings_locations[0].user.id, friend.id);
    assert_eq!(
        listed.followings_locations[0].location,
        Coordinate { lat: 10.0, lng: 10.0 }
    );
}

#[tokio::test]
async fn test_invalid_coordinates_rejected() {
    let server = TestServer::start().await.unwrap();
    let (_, token) = register(&server, "lost").await;

    let response = server
        .post_auth("/api/v1/locations", &token, &json!({ "lng": 20.0 }))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST, "INVALID_COORDINATE")
        .await
        .unwrap();
    assert_eq!(error["details"]["lat"][0], "This field is required.");

    let response = server
        .post_auth("/api/v1/locations", &token, &json!({ "lat": 95, "lng": 20 }))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_COORDINATE")
        .await
        .unwrap();

    let response = server
        .post_auth("/api/v1/locations", &token, &json!({ "lat": "44.8", "lng": "20.4" }))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

// ============================================================================
// Interaction Tests
// ============================================================================

#[tokio::test]
async fn test_log_interactions_and_rank_friends() {
    let server = TestServer::start().await.unwrap();
    let (_, token) = register(&server, "caller").await;
    let (friend, _) = register(&server, "callee").await;
    let (stranger, _) = register(&server, "stranger").await;
    follow(&server, &token, &friend).await;

    for kind in ["call", "sms"] {
        let response = server
            .post_auth(
                "/api/v1/interactions",
                &token,
                &json!({ "type": kind, "phone": friend.phone, "lat": 1.0, "lng": 1.0 }),
            )
            .await
            .unwrap();
        let logged: InteractionResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        assert_eq!(logged.kind, kind);
        assert_eq!(logged.partner.id, friend.id);
    }

    let response = server
        .post_auth(
            "/api/v1/interactions",
            &token,
            &json!({ "type": "physical", "partner_email": friend.email, "lat": 1.0, "lng": 1.0 }),
        )
        .await
        .unwrap();
    let physical: InteractionResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(!physical.id.is_empty());

    let response = server
        .post_auth(
            "/api/v1/interactions",
            &token,
            &json!({ "type": "call", "phone": stranger.phone, "lat": 1.0, "lng": 1.0 }),
        )
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "PARTNER_NOT_FOLLOWED")
        .await
        .unwrap();

    let response = server
        .get_auth("/api/v1/users/@me/top-friends", &token)
        .await
        .unwrap();
    let top: Vec<TopFriendResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].user.id, friend.id);
    assert_eq!(top[0].interactions, 3);
}

#[tokio::test]
async fn test_interaction_field_errors() {
    let server = TestServer::start().await.unwrap();
    let (_, token) = register(&server, "sloppy").await;

    let response = server
        .post_auth("/api/v1/interactions", &token, &json!({ "lat": 1, "lng": 1 }))
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST, "INVALID_FIELD")
        .await
        .unwrap();
    assert_eq!(error["details"]["type"][0], "This field is required.");

    let response = server
        .post_auth(
            "/api/v1/interactions",
            &token,
            &json!({ "type": "physical", "lat": 1, "lng": 1 }),
        )
        .await
        .unwrap();
    let error = assert_error(response, StatusCode::BAD_REQUEST, "INVALID_FIELD")
        .await
        .unwrap();
    assert_eq!(
        error["details"]["partner_email"][0],
        "This field is required in case type is physical."
    );
}

// ============================================================================
// Place Tests
// ============================================================================

#[tokio::test]
async fn test_place_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let (owner, owner_token) = register(&server, "owner").await;
    let (_, other_token) = register(&server, "other").await;

    let response = server
        .post_auth(
            "/api/v1/places",
            &owner_token,
            &CreatePlaceRequest::new(44.8, 20.4, "cafe"),
        )
        .await
        .unwrap();
    let place: PlaceResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(place.owner_id, owner.id);

    let path = format!("/api/v1/places/{}", place.id);
    let response = server.get_auth(&path, &other_token).await.unwrap();
    let fetched: PlaceResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.category, "cafe");

    let update = json!({ "description": "Best espresso in town" });
    let response = server.patch_auth(&path, &other_token, &update).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "NOT_PLACE_OWNER")
        .await
        .unwrap();

    let response = server.patch_auth(&path, &owner_token, &update).await.unwrap();
    let updated: PlaceResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.description, "Best espresso in town");
    assert_eq!(updated.location, Coordinate { lat: 44.8, lng: 20.4 });

    let response = server
        .get_auth("/api/v1/places/12345", &owner_token)
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_place_lists_and_top_places() {
    let server = TestServer::start().await.unwrap();
    let (_, my_token) = register(&server, "regular").await;
    let (friend, friend_token) = register(&server, "guide").await;
    follow(&server, &my_token, &friend).await;

    for (lat, lng, category) in [(1.0, 1.0, "home"), (2.0, 2.0, "gym")] {
        let response = server
            .post_auth(
                "/api/v1/places",
                &my_token,
                &CreatePlaceRequest::new(lat, lng, category),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }
    let response = server
        .post_auth(
            "/api/v1/places",
            &friend_token,
            &CreatePlaceRequest::new(3.0, 3.0, "museum"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    post_location(&server, &my_token, 1.0, 1.0).await;
    post_location(&server, &my_token, 1.0005, 1.0).await;
    post_location(&server, &my_token, 2.0, 2.0).await;

    let response = server
        .get_auth("/api/v1/users/@me/places", &my_token)
        .await
        .unwrap();
    let mine: Vec<PlaceResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine.len(), 2);

    let response = server
        .get_auth("/api/v1/places/following", &my_token)
        .await
        .unwrap();
    let theirs: Vec<PlaceResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].category, "museum");

    let response = server
        .get_auth("/api/v1/users/@me/top-places?limit=1", &my_token)
        .await
        .unwrap();
    let top: Vec<TopPlaceResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].place.category, "home");
    assert_eq!(top[0].visits, 2);
}
