//! PostgreSQL implementation of PlaceRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use nearby_core::entities::Place;
use nearby_core::error::DomainError;
use nearby_core::traits::{PlaceRepository, RepoResult};
use nearby_core::value_objects::Snowflake;

use crate::mappers::PlaceInsert;
use crate::models::PlaceModel;

use super::error::map_db_error;

/// PostgreSQL implementation of PlaceRepository
#[derive(Clone)]
pub struct PgPlaceRepository {
    pool: PgPool,
}

impl PgPlaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaceRepository for PgPlaceRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Place>> {
        let result = sqlx::query_as::<_, PlaceModel>(
            r"
            SELECT id, owner_id, latitude, longitude, category, description, image, created_at, updated_at
            FROM places
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Place::from))
    }

    #[instrument(skip(self))]
    async fn find_by_owner(&self, owner_id: Snowflake) -> RepoResult<Vec<Place>> {
        self.find_by_owners(&[owner_id]).await
    }

    #[instrument(skip(self))]
    async fn find_by_owners(&self, owner_ids: &[Snowflake]) -> RepoResult<Vec<Place>> {
        if owner_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = owner_ids.iter().map(|id| id.into_inner()).collect();
        let rows = sqlx::query_as::<_, PlaceModel>(
            r"
            SELECT id, owner_id, latitude, longitude, category, description, image, created_at, updated_at
            FROM places
            WHERE owner_id = ANY($1)
            ORDER BY updated_at DESC, id DESC
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Place::from).collect())
    }

    #[instrument(skip(self, place), fields(place_id = %place.id))]
    async fn create(&self, place: &Place) -> RepoResult<()> {
        let row = PlaceInsert::new(place);
        sqlx::query(
            r"
            INSERT INTO places (id, owner_id, latitude, longitude, category, description, image, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(row.id)
        .bind(row.owner_id)
        .bind(row.latitude)
        .bind(row.longitude)
        .bind(row.category)
        .bind(row.description)
        .bind(row.image)
        .bind(place.created_at)
        .bind(place.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, place), fields(place_id = %place.id))]
    async fn update(&self, place: &Place) -> RepoResult<()> {
        let row = PlaceInsert::new(place);
        let result = sqlx::query(
            r"
            UPDATE places
            SET latitude = $2, longitude = $3, category = $4, description = $5, image = $6,
                updated_at = $7
            WHERE id = $1
            ",
        )
        .bind(row.id)
        .bind(row.latitude)
        .bind(row.longitude)
        .bind(row.category)
        .bind(row.description)
        .bind(row.image)
        .bind(place.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PlaceNotFound(place.id));
        }

        Ok(())
    }
}
