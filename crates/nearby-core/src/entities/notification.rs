//! Notification - write-once record that `notifier` was announced to `notified`

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    pub notifier_id: Snowflake,
    pub notified_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        id: Snowflake,
        notifier_id: Snowflake,
        notified_id: Snowflake,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            notifier_id,
            notified_id,
            created_at,
        }
    }
}
