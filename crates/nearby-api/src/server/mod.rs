//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use nearby_common::{AppConfig, AppError, JwtService};
use nearby_core::SnowflakeGenerator;
use nearby_db::{create_pool, run_migrations, MemoryStore};
use nearby_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_rate_limit(create_router(), &config.rate_limit)?;
    let router = apply_middleware(api.merge(health_routes()), config);
    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
///
/// PostgreSQL is used when `database.url` is set; otherwise data lives in
/// process memory and is lost on restart.
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let jwt_service = Arc::new(JwtService::from_config(&config.jwt));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));
    let proximity = config.proximity.clone();

    let service_context = if config.database.url.is_some() {
        info!("Connecting to PostgreSQL...");
        let pool = create_pool(&config.database)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        info!("PostgreSQL connection established");

        if config.database.run_migrations {
            run_migrations(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("Database migrations applied");
        }

        ServiceContext::postgres(pool, jwt_service, snowflake_generator, proximity)
    } else {
        warn!("No database URL configured, using the in-memory store");
        ServiceContext::in_memory(MemoryStore::new(), jwt_service, snowflake_generator, proximity)
    };

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use nearby_common::{
        AppSettings, CorsConfig, DatabaseConfig, JwtConfig, ProximityConfig, RateLimitConfig,
        ServerConfig, SnowflakeConfig,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_config() -> AppConfig {
        AppConfig {
            app: AppSettings::default(),
            api: ServerConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                issuer: None,
                access_token_expiry: 900,
            },
            rate_limit: RateLimitConfig::default(),
            cors: CorsConfig::default(),
            snowflake: SnowflakeConfig::default(),
            proximity: ProximityConfig::default(),
        }
    }

    async fn app() -> Router {
        let state = create_app_state(test_config()).await.unwrap();
        create_app(state).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_readiness_without_database() {
        let response = app()
            .await
            .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        let body = body_json(response).await;
        assert_eq!(body["checks"]["database"], "in_memory");
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let response = app()
            .await
            .oneshot(Request::get("/api/v1/users/@me").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "MISSING_AUTHORIZATION");
    }

    #[tokio::test]
    async fn test_create_user_then_fetch_with_token() {
        let config = test_config();
        let jwt = JwtService::from_config(&config.jwt);
        let app = create_app(create_app_state(config).await.unwrap()).unwrap();

        let request = Request::post("/api/v1/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "email": "ana@example.com",
                    "first_name": "Ana",
                    "phone": "+381600000001"
                })
                .to_string(),
            ))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap().parse().unwrap();

        let token = jwt.issue_access_token(id).unwrap();
        let response = app
            .oneshot(
                Request::get("/api/v1/users/@me")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["email"], "ana@example.com");
    }

    #[tokio::test]
    async fn test_invalid_limit_rejected() {
        let config = test_config();
        let jwt = JwtService::from_config(&config.jwt);
        let token = jwt.issue_access_token(nearby_core::Snowflake::new(1)).unwrap();

        let response = app()
            .await
            .oneshot(
                Request::get("/api/v1/users/@me/top-friends?limit=0")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }
}
