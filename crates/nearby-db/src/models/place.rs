//! Place of interest database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for places table
#[derive(Debug, Clone, FromRow)]
pub struct PlaceModel {
    pub id: i64,
    pub owner_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub category: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
