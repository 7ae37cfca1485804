//! Interaction database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for interactions table
#[derive(Debug, Clone, FromRow)]
pub struct InteractionModel {
    pub id: i64,
    pub initiator_id: i64,
    pub partner_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub kind: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

