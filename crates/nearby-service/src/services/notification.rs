//! Notification service

use nearby_core::Snowflake;
use tracing::instrument;

use crate::dto::NotificationResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

const DEFAULT_LIMIT: i64 = 50;

pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Notifications in which `user_id` was announced, newest first
    #[instrument(skip(self))]
    pub async fn received(
        &self,
        user_id: Snowflake,
        limit: Option<u32>,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let limit = limit.map_or(DEFAULT_LIMIT, i64::from);
        let notifications = self
            .ctx
            .notification_repo()
            .find_by_notified(user_id, limit)
            .await?;
        Ok(notifications.iter().map(NotificationResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ProximityEvaluator;
    use crate::test_support::{context, noon, user};
    use chrono::Duration;

    #[tokio::test]
    async fn test_received_newest_first() {
        let ctx = context();
        let a = user(&ctx, "a").await;
        let b = user(&ctx, "b").await;
        let me = user(&ctx, "me").await;
        let evaluator = ProximityEvaluator::new(&ctx);

        evaluator.notify_if_due(a.id, &[me.id], noon()).await.unwrap();
        evaluator
            .notify_if_due(b.id, &[me.id], noon() + Duration::minutes(1))
            .await
            .unwrap();

        let service = NotificationService::new(&ctx);
        let received = service.received(me.id, None).await.unwrap();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0].notifier_id, b.id.to_string());

        assert_eq!(service.received(me.id, Some(1)).await.unwrap().len(), 1);
        assert!(service.received(a.id, None).await.unwrap().is_empty());
    }
}
