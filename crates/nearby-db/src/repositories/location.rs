//! PostgreSQL implementation of LocationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use nearby_core::entities::LocationRecord;
use nearby_core::error::DomainError;
use nearby_core::traits::{LocationRepository, RepoResult};
use nearby_core::value_objects::Snowflake;

use crate::mappers::LocationInsert;
use crate::models::LocationModel;

use super::error::map_db_error;

/// PostgreSQL implementation of LocationRepository
#[derive(Clone)]
pub struct PgLocationRepository {
    pool: PgPool,
}

impl PgLocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PgLocationRepository {
    #[instrument(skip(self, record), fields(user_id = %record.user_id))]
    async fn create(&self, record: &LocationRecord) -> RepoResult<()> {
        let row = LocationInsert::new(record);
        sqlx::query(
            r"
            INSERT INTO user_locations (id, user_id, latitude, longitude, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(row.id)
        .bind(row.user_id)
        .bind(row.latitude)
        .bind(row.longitude)
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_latest(&self, user_id: Snowflake) -> RepoResult<Option<LocationRecord>> {
        let result = sqlx::query_as::<_, LocationModel>(
            r"
            SELECT id, user_id, latitude, longitude, created_at, updated_at
            FROM user_locations
            WHERE user_id = $1
            ORDER BY updated_at DESC, id DESC
            LIMIT 1
            ",
        )
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(LocationRecord::from))
    }

    #[instrument(skip(self))]
    async fn find_by_user(
        &self,
        user_id: Snowflake,
        limit: Option<i64>,
    ) -> RepoResult<Vec<LocationRecord>> {
        // NULL limit means no limit in PostgreSQL
        let rows = sqlx::query_as::<_, LocationModel>(
            r"
            SELECT id, user_id, latitude, longitude, created_at, updated_at
            FROM user_locations
            WHERE user_id = $1
            ORDER BY updated_at DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(LocationRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn touch(&self, id: Snowflake, at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query("UPDATE user_locations SET updated_at = $2 WHERE id = $1")
            .bind(id.into_inner())
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LocationNotFound(id));
        }

        Ok(())
    }
}
