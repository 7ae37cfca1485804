//! # nearby-db
//!
//! Persistence for the repository traits defined in `nearby-core`:
//!
//! - PostgreSQL repositories over SQLx, with plain SQL migrations
//! - Database models with SQLx `FromRow` derives and entity mappers
//! - [`memory::MemoryStore`], an in-process implementation of every trait
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nearby_db::{create_pool, run_migrations, PgUserRepository};
//!
//! async fn example(config: &nearby_common::DatabaseConfig) -> anyhow::Result<()> {
//!     let pool = create_pool(config).await?;
//!     run_migrations(&pool).await?;
//!     let users = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, PgPool};
pub use repositories::{
    PgFollowRepository, PgInteractionRepository, PgLocationRepository, PgNotificationRepository,
    PgPlaceRepository, PgUserRepository,
};
