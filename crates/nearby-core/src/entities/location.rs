//! Location record - one reported position of a user

use chrono::{DateTime, Duration, Utc};

use crate::value_objects::{Coordinate, Snowflake};

/// A position reported by a user. The most recently updated record is the
/// user's current location.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub coordinate: Coordinate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LocationRecord {
    pub fn new(id: Snowflake, user_id: Snowflake, coordinate: Coordinate, at: DateTime<Utc>) -> Self {
        Self {
            id,
            user_id,
            coordinate,
            created_at: at,
            updated_at: at,
        }
    }

    /// Time since the record was last refreshed
    #[inline]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.updated_at
    }

    /// Fresh means refreshed strictly in the past and no longer than `window` ago
    pub fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        let age = self.age(now);
        age > Duration::zero() && age <= window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_window() {
        let now = Utc::now();
        let window = Duration::minutes(15);
        let mut record = LocationRecord::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Coordinate::new(44.8, 20.4),
            now - Duration::minutes(5),
        );
        assert!(record.is_fresh(now, window));

        record.updated_at = now - Duration::minutes(15);
        assert!(record.is_fresh(now, window));

        record.updated_at = now - Duration::minutes(16);
        assert!(!record.is_fresh(now, window));

        // Same instant is not considered fresh
        record.updated_at = now;
        assert!(!record.is_fresh(now, window));
    }
}
