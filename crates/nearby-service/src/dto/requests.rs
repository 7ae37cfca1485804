//! Request DTOs for API endpoints
//!
//! Field-level rules with fixed messages live on the DTOs: either as
//! `validator` attributes or as a `parse` step returning a field-specific
//! `DomainError`.

use chrono::NaiveDate;
use nearby_core::{Coordinate, DomainError, Gender, InteractionKind};
use serde::Deserialize;
use validator::{Validate, ValidateEmail};

const REQUIRED: &str = "This field is required.";

// ============================================================================
// Common
// ============================================================================

/// One coordinate axis as sent by clients: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Text(String),
}

impl AxisValue {
    fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for AxisValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

fn parse_coordinate(lat: Option<&AxisValue>, lng: Option<&AxisValue>) -> Result<Coordinate, DomainError> {
    let lat = lat.map(AxisValue::to_text).unwrap_or_default();
    let lng = lng.map(AxisValue::to_text).unwrap_or_default();
    Coordinate::parse(&lat, &lng)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// `?limit=` for ranked and paged lists
#[derive(Debug, Clone, Copy, Default, Deserialize, Validate)]
pub struct LimitQuery {
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<u32>,
}

// ============================================================================
// User Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 50, message = "Email must be at most 50 characters")
    )]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 25, message = "First name must be at most 25 characters"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(max = 25, message = "Last name must be at most 25 characters"))]
    pub last_name: String,

    #[validate(length(min = 1, max = 15, message = "Phone must be 1-15 characters"))]
    pub phone: String,

    #[serde(default)]
    pub gender: Gender,

    #[serde(default, alias = "birth_day")]
    pub birthday: Option<NaiveDate>,

    #[serde(default)]
    #[validate(length(max = 50, message = "Country must be at most 50 characters"))]
    pub country: String,

    #[serde(default)]
    #[validate(length(max = 50, message = "City must be at most 50 characters"))]
    pub city: String,

    /// Reference to an already uploaded picture
    #[validate(length(max = 255, message = "Image reference must be at most 255 characters"))]
    pub image: Option<String>,
}

// ============================================================================
// Location Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostLocationRequest {
    pub lat: Option<AxisValue>,
    pub lng: Option<AxisValue>,
}

impl PostLocationRequest {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat: Some(lat.into()),
            lng: Some(lng.into()),
        }
    }

    pub fn coordinate(&self) -> Result<Coordinate, DomainError> {
        parse_coordinate(self.lat.as_ref(), self.lng.as_ref())
    }
}

// ============================================================================
// Interaction Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LogInteractionRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub partner_email: Option<String>,
    pub phone: Option<String>,
    pub lat: Option<AxisValue>,
    pub lng: Option<AxisValue>,
}

/// How the partner of a logged interaction is identified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartnerRef {
    Email(String),
    Phone(String),
}

/// A logged interaction after field checks
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionInput {
    pub kind: InteractionKind,
    pub partner: PartnerRef,
    pub coordinate: Coordinate,
}

impl LogInteractionRequest {
    /// Check the fields in order and report the first one that is wrong.
    ///
    /// A phone number wins over an email when both identify the partner.
    pub fn parse(&self) -> Result<InteractionInput, DomainError> {
        let kind = non_blank(self.kind.as_deref())
            .ok_or_else(|| DomainError::invalid_field("type", REQUIRED))?
            .parse::<InteractionKind>()
            .map_err(|_| {
                DomainError::invalid_field(
                    "type",
                    "This field must have one of next values (call, sms, physical).",
                )
            })?;

        let email = non_blank(self.partner_email.as_deref());
        let phone = non_blank(self.phone.as_deref());

        if email.is_none() && kind == InteractionKind::Physical {
            return Err(DomainError::invalid_field(
                "partner_email",
                "This field is required in case type is physical.",
            ));
        }
        if let Some(email) = email {
            if !email.validate_email() {
                return Err(DomainError::invalid_field(
                    "partner_email",
                    "This field has invalid email format.",
                ));
            }
        }
        if phone.is_none() && kind != InteractionKind::Physical {
            return Err(DomainError::invalid_field(
                "phone",
                "This field is required in case type is either call or sms.",
            ));
        }

        let coordinate = parse_coordinate(self.lat.as_ref(), self.lng.as_ref())?;

        let partner = match (phone, email) {
            (Some(phone), _) => PartnerRef::Phone(phone.to_owned()),
            (None, Some(email)) => PartnerRef::Email(email.to_owned()),
            (None, None) => return Err(DomainError::invalid_field("partner_email", REQUIRED)),
        };

        Ok(InteractionInput {
            kind,
            partner,
            coordinate,
        })
    }
}

// ============================================================================
// Place Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePlaceRequest {
    pub lat: Option<AxisValue>,
    pub lng: Option<AxisValue>,

    #[serde(rename = "type", default)]
    #[validate(length(min = 1, max = 50, message = "Type must be 1-50 characters"))]
    pub category: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 1000, message = "Description must be 1-1000 characters"))]
    pub description: String,

    #[validate(length(max = 255, message = "Image reference must be at most 255 characters"))]
    pub image: Option<String>,
}

impl CreatePlaceRequest {
    pub fn coordinate(&self) -> Result<Coordinate, DomainError> {
        parse_coordinate(self.lat.as_ref(), self.lng.as_ref())
    }
}

/// Partial update; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePlaceRequest {
    pub lat: Option<AxisValue>,
    pub lng: Option<AxisValue>,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50, message = "Type must be 1-50 characters"))]
    pub category: Option<String>,

    #[validate(length(min = 1, max = 1000, message = "Description must be 1-1000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 255, message = "Image reference must be at most 255 characters"))]
    pub image: Option<String>,
}

impl UpdatePlaceRequest {
    /// New position, filling a missing axis from `current`.
    /// `None` when neither axis was sent.
    pub fn coordinate(&self, current: Coordinate) -> Result<Option<Coordinate>, DomainError> {
        if self.lat.is_none() && self.lng.is_none() {
            return Ok(None);
        }
        let lat = self
            .lat
            .clone()
            .unwrap_or(AxisValue::Number(current.latitude));
        let lng = self
            .lng
            .clone()
            .unwrap_or(AxisValue::Number(current.longitude));
        parse_coordinate(Some(&lat), Some(&lng)).map(Some)
    }
}
