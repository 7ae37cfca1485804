//! Fixtures shared by the service tests

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use nearby_common::{JwtService, ProximityConfig};
use nearby_core::traits::{FollowRepository, UserRepository};
use nearby_core::{Snowflake, SnowflakeGenerator, User};
use nearby_db::MemoryStore;

use crate::services::ServiceContext;

pub fn context() -> ServiceContext {
    ServiceContext::in_memory(
        MemoryStore::new(),
        Arc::new(JwtService::new("test-secret", 900)),
        Arc::new(SnowflakeGenerator::new(1)),
        ProximityConfig::default(),
    )
}

/// Fixed instant so cooldown and freshness arithmetic is exact
pub fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
}

pub async fn user(ctx: &ServiceContext, name: &str) -> User {
    let id = ctx.generate_id();
    let mut user = User::new(id, format!("{name}@example.com"), format!("+{}", id.into_inner() % 1_000_000_000));
    user.first_name = name.to_string();
    user.image = Some(format!("users_photo/{name}.png"));
    ctx.user_repo().create(&user).await.unwrap();
    user
}

pub async fn follow(ctx: &ServiceContext, follower: Snowflake, followed: Snowflake) {
    ctx.follow_repo().follow(follower, followed).await.unwrap();
}
