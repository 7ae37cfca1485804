//! User location database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for user_locations table
#[derive(Debug, Clone, FromRow)]
pub struct LocationModel {
    pub id: i64,
    pub user_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
