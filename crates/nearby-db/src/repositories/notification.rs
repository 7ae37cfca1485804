//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use nearby_core::entities::Notification;
use nearby_core::traits::{NotificationRepository, RepoResult};
use nearby_core::value_objects::Snowflake;

use crate::mappers::NotificationInsert;
use crate::models::NotificationModel;

use super::error::map_db_error;

/// PostgreSQL implementation of NotificationRepository
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self))]
    async fn find_recent(
        &self,
        notifier_id: Snowflake,
        notified_id: Snowflake,
        since: DateTime<Utc>,
    ) -> RepoResult<Option<Notification>> {
        let result = sqlx::query_as::<_, NotificationModel>(
            r"
            SELECT id, notifier_id, notified_id, created_at
            FROM notifications
            WHERE notifier_id = $1 AND notified_id = $2 AND created_at >= $3
            ORDER BY created_at DESC
            LIMIT 1
            ",
        )
        .bind(notifier_id.into_inner())
        .bind(notified_id.into_inner())
        .bind(since)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Notification::from))
    }

    #[instrument(skip(self, notification), fields(notifier_id = %notification.notifier_id, notified_id = %notification.notified_id))]
    async fn create(&self, notification: &Notification) -> RepoResult<()> {
        let row = NotificationInsert::new(notification);
        sqlx::query(
            r"
            INSERT INTO notifications (id, notifier_id, notified_id, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(row.id)
        .bind(row.notifier_id)
        .bind(row.notified_id)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_notified(&self, user_id: Snowflake, limit: i64) -> RepoResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationModel>(
            r"
            SELECT id, notifier_id, notified_id, created_at
            FROM notifications
            WHERE notified_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(user_id.into_inner())
        .bind(limit.clamp(1, 100))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Notification::from).collect())
    }
}
