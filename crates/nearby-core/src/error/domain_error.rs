//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Place not found: {0}")]
    PlaceNotFound(Snowflake),

    #[error("Interaction not found: {0}")]
    InteractionNotFound(Snowflake),

    #[error("Location not found: {0}")]
    LocationNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid coordinate ({field}): {reason}")]
    InvalidCoordinate { field: &'static str, reason: String },

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid interaction type: {0}")]
    InvalidInteractionKind(String),

    #[error("Cannot follow yourself")]
    CannotFollowSelf,

    #[error("There is no such a email or phone number of user's followings.")]
    PartnerNotFollowed,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not place owner")]
    NotPlaceOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Phone number already in use")]
    PhoneAlreadyExists,

    #[error("An open physical interaction already exists for this pair")]
    InteractionAlreadyOpen,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn invalid_coordinate(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            field,
            reason: reason.into(),
        }
    }

    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PlaceNotFound(_) => "UNKNOWN_PLACE",
            Self::InteractionNotFound(_) => "UNKNOWN_INTERACTION",
            Self::LocationNotFound(_) => "UNKNOWN_LOCATION",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidCoordinate { .. } => "INVALID_COORDINATE",
            Self::InvalidField { .. } => "INVALID_FIELD",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidInteractionKind(_) => "INVALID_INTERACTION_TYPE",
            Self::CannotFollowSelf => "CANNOT_FOLLOW_SELF",
            Self::PartnerNotFollowed => "PARTNER_NOT_FOLLOWED",

            // Authorization
            Self::NotPlaceOwner => "NOT_PLACE_OWNER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::PhoneAlreadyExists => "PHONE_ALREADY_EXISTS",
            Self::InteractionAlreadyOpen => "INTERACTION_ALREADY_OPEN",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Field the error refers to, for per-field validation responses
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidCoordinate { field, .. } | Self::InvalidField { field, .. } => Some(field),
            Self::InvalidEmail | Self::EmailAlreadyExists => Some("email"),
            Self::PhoneAlreadyExists => Some("phone"),
            Self::InvalidInteractionKind(_) => Some("type"),
            Self::PartnerNotFollowed => Some("partner"),
            _ => None,
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::PlaceNotFound(_)
                | Self::InteractionNotFound(_)
                | Self::LocationNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidCoordinate { .. }
                | Self::InvalidField { .. }
                | Self::InvalidEmail
                | Self::InvalidInteractionKind(_)
                | Self::CannotFollowSelf
                | Self::PartnerNotFollowed
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotPlaceOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists | Self::PhoneAlreadyExists | Self::InteractionAlreadyOpen
        )
    }
}
