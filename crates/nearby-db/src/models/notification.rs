//! Notification database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for notifications table
#[derive(Debug, Clone, FromRow)]
pub struct NotificationModel {
    pub id: i64,
    pub notifier_id: i64,
    pub notified_id: i64,
    pub created_at: DateTime<Utc>,
}
