//! JWT access-token verification
//!
//! Tokens are HS256-signed by the identity provider with a shared secret.
//! `issue_access_token` exists for tests and local tooling.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use nearby_core::Snowflake;
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;
use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl Claims {
    /// Get the user ID as a Snowflake
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }
}

/// Verifies bearer tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: Option<String>,
    access_token_expiry: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: None,
            access_token_expiry,
        }
    }

    #[must_use]
    pub fn from_config(config: &JwtConfig) -> Self {
        let mut service = Self::new(&config.secret, config.access_token_expiry);
        service.issuer.clone_from(&config.issuer);
        service
    }

    /// Require the `iss` claim to match
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Mint an access token for `user_id`
    pub fn issue_access_token(&self, user_id: Snowflake) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("failed to encode JWT: {e}")))
    }

    /// Decode and validate an access token
    ///
    /// # Errors
    /// `TokenExpired` for expired tokens, `InvalidToken` for anything else
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::default();
        if let Some(issuer) = &self.issuer {
            validation.set_issuer(&[issuer]);
        }

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        // Reject tokens whose subject is not a user id up front
        data.claims.user_id()?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.issuer)
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-that-is-long-enough";

    #[test]
    fn test_issue_and_validate() {
        let service = JwtService::new(SECRET, 900);
        let token = service.issue_access_token(Snowflake::new(12345)).unwrap();

        let claims = service.validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, "12345");
        assert_eq!(claims.user_id().unwrap(), Snowflake::new(12345));
    }

    #[test]
    fn test_wrong_secret() {
        let token = JwtService::new(SECRET, 900)
            .issue_access_token(Snowflake::new(1))
            .unwrap();
        let other = JwtService::new("another-secret", 900);
        assert!(matches!(other.validate_access_token(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_expired_token() {
        // Well past the default 60s leeway
        let service = JwtService::new(SECRET, -3600);
        let token = service.issue_access_token(Snowflake::new(1)).unwrap();
        assert!(matches!(service.validate_access_token(&token), Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_issuer_must_match() {
        let provider = JwtService::new(SECRET, 900).with_issuer("accounts");
        let token = provider.issue_access_token(Snowflake::new(7)).unwrap();

        assert!(provider.validate_access_token(&token).is_ok());

        let strict = JwtService::new(SECRET, 900).with_issuer("someone-else");
        assert!(strict.validate_access_token(&token).is_err());
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let service = JwtService::new(SECRET, 900);
        let claims = Claims {
            sub: "alice".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 600,
            iss: None,
        };
        let token = encode(&Header::default(), &claims, &service.encoding_key).unwrap();
        assert!(matches!(service.validate_access_token(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token() {
        let service = JwtService::new(SECRET, 900);
        assert!(matches!(
            service.validate_access_token("invalid.token.here"),
            Err(AppError::InvalidToken)
        ));
    }
}
