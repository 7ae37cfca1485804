//! PostgreSQL implementation of InteractionRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use nearby_core::entities::Interaction;
use nearby_core::error::DomainError;
use nearby_core::traits::{InteractionRepository, RepoResult};
use nearby_core::value_objects::{Coordinate, Snowflake};

use crate::mappers::InteractionInsert;
use crate::models::InteractionModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of InteractionRepository
#[derive(Clone)]
pub struct PgInteractionRepository {
    pool: PgPool,
}

impl PgInteractionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InteractionRepository for PgInteractionRepository {
    #[instrument(skip(self))]
    async fn find_open_physical(
        &self,
        initiator_id: Snowflake,
        partner_id: Snowflake,
    ) -> RepoResult<Option<Interaction>> {
        let result = sqlx::query_as::<_, InteractionModel>(
            r"
            SELECT id, initiator_id, partner_id, latitude, longitude, kind, started_at, ended_at
            FROM interactions
            WHERE initiator_id = $1 AND partner_id = $2
              AND kind = 'physical' AND ended_at IS NULL
            ",
        )
        .bind(initiator_id.into_inner())
        .bind(partner_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Interaction::from))
    }

    #[instrument(skip(self, interaction), fields(interaction_id = %interaction.id, kind = %interaction.kind))]
    async fn create(&self, interaction: &Interaction) -> RepoResult<()> {
        let row = InteractionInsert::new(interaction);
        sqlx::query(
            r"
            INSERT INTO interactions (id, initiator_id, partner_id, latitude, longitude, kind, started_at, ended_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(row.id)
        .bind(row.initiator_id)
        .bind(row.partner_id)
        .bind(row.latitude)
        .bind(row.longitude)
        .bind(row.kind)
        .bind(interaction.started_at)
        .bind(interaction.ended_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::InteractionAlreadyOpen))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_location(&self, id: Snowflake, coordinate: Coordinate) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE interactions SET latitude = $2, longitude = $3 WHERE id = $1",
        )
        .bind(id.into_inner())
        .bind(coordinate.latitude)
        .bind(coordinate.longitude)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::InteractionNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn close(&self, id: Snowflake, ended_at: DateTime<Utc>) -> RepoResult<()> {
        // Already-closed sessions keep their original end time
        let result = sqlx::query(
            r"
            UPDATE interactions
            SET ended_at = GREATEST($2, started_at)
            WHERE id = $1 AND kind = 'physical' AND ended_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(ended_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::InteractionNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_involving(&self, user_id: Snowflake) -> RepoResult<Vec<Interaction>> {
        let rows = sqlx::query_as::<_, InteractionModel>(
            r"
            SELECT id, initiator_id, partner_id, latitude, longitude, kind, started_at, ended_at
            FROM interactions
            WHERE initiator_id = $1 OR partner_id = $1
            ORDER BY started_at DESC, id DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Interaction::from).collect())
    }
}
