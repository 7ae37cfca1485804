//! Service context - dependency container for services
//!
//! Holds the repositories, the token verifier, the id generator and the
//! proximity settings shared by every service.

use std::sync::Arc;

use nearby_common::auth::JwtService;
use nearby_common::ProximityConfig;
use nearby_core::traits::{
    FollowRepository, InteractionRepository, LocationRepository, NotificationRepository,
    PlaceRepository, UserRepository,
};
use nearby_core::{Snowflake, SnowflakeGenerator};
use nearby_db::{
    MemoryStore, PgFollowRepository, PgInteractionRepository, PgLocationRepository,
    PgNotificationRepository, PgPlaceRepository, PgPool, PgUserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// The pool is only present when the repositories are backed by PostgreSQL.
#[derive(Clone)]
pub struct ServiceContext {
    pool: Option<PgPool>,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    follow_repo: Arc<dyn FollowRepository>,
    location_repo: Arc<dyn LocationRepository>,
    interaction_repo: Arc<dyn InteractionRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    place_repo: Arc<dyn PlaceRepository>,

    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    proximity: ProximityConfig,
}

impl ServiceContext {
    /// Context backed by PostgreSQL repositories sharing one pool
    pub fn postgres(
        pool: PgPool,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        proximity: ProximityConfig,
    ) -> Self {
        Self {
            user_repo: Arc::new(PgUserRepository::new(pool.clone())),
            follow_repo: Arc::new(PgFollowRepository::new(pool.clone())),
            location_repo: Arc::new(PgLocationRepository::new(pool.clone())),
            interaction_repo: Arc::new(PgInteractionRepository::new(pool.clone())),
            notification_repo: Arc::new(PgNotificationRepository::new(pool.clone())),
            place_repo: Arc::new(PgPlaceRepository::new(pool.clone())),
            pool: Some(pool),
            jwt_service,
            snowflake_generator,
            proximity,
        }
    }

    /// Context backed by a single in-process store
    pub fn in_memory(
        store: MemoryStore,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        proximity: ProximityConfig,
    ) -> Self {
        Self {
            pool: None,
            user_repo: Arc::new(store.clone()),
            follow_repo: Arc::new(store.clone()),
            location_repo: Arc::new(store.clone()),
            interaction_repo: Arc::new(store.clone()),
            notification_repo: Arc::new(store.clone()),
            place_repo: Arc::new(store),
            jwt_service,
            snowflake_generator,
            proximity,
        }
    }

    // === Database Pool ===

    /// The PostgreSQL pool, if the repositories use one
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    pub fn location_repo(&self) -> &dyn LocationRepository {
        self.location_repo.as_ref()
    }

    pub fn interaction_repo(&self) -> &dyn InteractionRepository {
        self.interaction_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    pub fn place_repo(&self) -> &dyn PlaceRepository {
        self.place_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }

    /// Distance bands, cooldown and freshness settings
    pub fn proximity(&self) -> &ProximityConfig {
        &self.proximity
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &self.pool.as_ref().map(|_| "PgPool"))
            .field("repositories", &"...")
            .field("proximity", &self.proximity)
            .finish()
    }
}

/// Builder for a ServiceContext with hand-picked repositories
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    location_repo: Option<Arc<dyn LocationRepository>>,
    interaction_repo: Option<Arc<dyn InteractionRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    place_repo: Option<Arc<dyn PlaceRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    proximity: Option<ProximityConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Use one in-memory store for every repository
    pub fn memory_store(self, store: &MemoryStore) -> Self {
        self.user_repo(Arc::new(store.clone()))
            .follow_repo(Arc::new(store.clone()))
            .location_repo(Arc::new(store.clone()))
            .interaction_repo(Arc::new(store.clone()))
            .notification_repo(Arc::new(store.clone()))
            .place_repo(Arc::new(store.clone()))
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn location_repo(mut self, repo: Arc<dyn LocationRepository>) -> Self {
        self.location_repo = Some(repo);
        self
    }

    pub fn interaction_repo(mut self, repo: Arc<dyn InteractionRepository>) -> Self {
        self.interaction_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn place_repo(mut self, repo: Arc<dyn PlaceRepository>) -> Self {
        self.place_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn proximity(mut self, config: ProximityConfig) -> Self {
        self.proximity = Some(config);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository or the JWT service
    /// is missing. The generator and proximity settings fall back to defaults.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: self.pool,
            user_repo: self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            follow_repo: self.follow_repo.ok_or_else(|| ServiceError::validation("follow_repo is required"))?,
            location_repo: self
                .location_repo
                .ok_or_else(|| ServiceError::validation("location_repo is required"))?,
            interaction_repo: self
                .interaction_repo
                .ok_or_else(|| ServiceError::validation("interaction_repo is required"))?,
            notification_repo: self
                .notification_repo
                .ok_or_else(|| ServiceError::validation("notification_repo is required"))?,
            place_repo: self.place_repo.ok_or_else(|| ServiceError::validation("place_repo is required"))?,
            jwt_service: self.jwt_service.ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            snowflake_generator: self
                .snowflake_generator
                .unwrap_or_else(|| Arc::new(SnowflakeGenerator::new(0))),
            proximity: self.proximity.unwrap_or_default(),
        })
    }
}
