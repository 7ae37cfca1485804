//! Interaction entity - a call, an SMS, or a physical meeting between two users

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{Coordinate, Snowflake};

/// Kind of interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    /// Co-location session with an open/close lifecycle
    Physical,
    Call,
    Sms,
}

impl InteractionKind {
    pub const ALL: [Self; 3] = [Self::Call, Self::Sms, Self::Physical];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Call => "call",
            Self::Sms => "sms",
        }
    }

    /// Only physical interactions are sessions; calls and SMS are point events
    #[inline]
    pub fn is_session(self) -> bool {
        matches!(self, Self::Physical)
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "physical" => Ok(Self::Physical),
            "call" => Ok(Self::Call),
            "sms" => Ok(Self::Sms),
            other => Err(DomainError::InvalidInteractionKind(other.to_string())),
        }
    }
}

/// Interaction record between an initiator and a partner
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub id: Snowflake,
    pub initiator_id: Snowflake,
    pub partner_id: Snowflake,
    pub coordinate: Coordinate,
    pub kind: InteractionKind,
    pub started_at: DateTime<Utc>,
    /// Set once a physical session is over; always `None` for calls and SMS
    pub ended_at: Option<DateTime<Utc>>,
}

impl Interaction {
    pub fn new(
        id: Snowflake,
        initiator_id: Snowflake,
        partner_id: Snowflake,
        coordinate: Coordinate,
        kind: InteractionKind,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            initiator_id,
            partner_id,
            coordinate,
            kind,
            started_at,
            ended_at: None,
        }
    }

    /// An open session is a physical interaction that has not been closed
    #[inline]
    pub fn is_open(&self) -> bool {
        self.kind.is_session() && self.ended_at.is_none()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.ended_at.is_some()
    }

    pub fn involves(&self, user_id: Snowflake) -> bool {
        self.initiator_id == user_id || self.partner_id == user_id
    }

    /// The participant that is not `user_id`, if `user_id` takes part at all
    pub fn other_party(&self, user_id: Snowflake) -> Option<Snowflake> {
        if self.initiator_id == user_id {
            Some(self.partner_id)
        } else if self.partner_id == user_id {
            Some(self.initiator_id)
        } else {
            None
        }
    }

    /// Move an open session to the latest shared position
    pub fn refresh_location(&mut self, coordinate: Coordinate) {
        self.coordinate = coordinate;
    }

    /// Close the session. Closing is final: a closed session is never reopened.
    pub fn close(&mut self, at: DateTime<Utc>) -> bool {
        if !self.is_open() {
            return false;
        }
        self.ended_at = Some(at.max(self.started_at));
        true
    }

    /// Length of a closed session
    pub fn duration(&self) -> Option<Duration> {
        self.ended_at.map(|end| end - self.started_at)
    }
}
