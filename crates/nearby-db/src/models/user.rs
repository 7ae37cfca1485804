//! User database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub gender: String,
    pub birthday: Option<NaiveDate>,
    pub country: String,
    pub city: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}
