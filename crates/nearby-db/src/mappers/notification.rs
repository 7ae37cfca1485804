//! Notification entity <-> model mapper

use nearby_core::entities::Notification;
use nearby_core::value_objects::Snowflake;

use crate::models::NotificationModel;

impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: Snowflake::new(model.id),
            notifier_id: Snowflake::new(model.notifier_id),
            notified_id: Snowflake::new(model.notified_id),
            created_at: model.created_at,
        }
    }
}

pub struct NotificationInsert {
    pub id: i64,
    pub notifier_id: i64,
    pub notified_id: i64,
}

impl NotificationInsert {
    pub fn new(notification: &Notification) -> Self {
        Self {
            id: notification.id.into_inner(),
            notifier_id: notification.notifier_id.into_inner(),
            notified_id: notification.notified_id.into_inner(),
        }
    }
}
