//! Application configuration structs
//!
//! Layered loading, lowest priority first:
//! 1. built-in defaults
//! 2. `config/default.toml`
//! 3. `config/{env}.toml`
//! 4. `NEARBY__SECTION__KEY` environment variables (plus plain `DATABASE_URL`)

use std::env;
use std::path::Path;

use chrono::Duration;
use config::{Config, File};
use nearby_core::Thresholds;
use serde::Deserialize;

const ENV_PREFIX: &str = "NEARBY";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub api: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub snowflake: SnowflakeConfig,
    #[serde(default)]
    pub proximity: ProximityConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: Environment::default(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Staging => "staging",
            Self::Production => "production",
        }
    }

    /// Read `APP_ENV`, defaulting to development
    pub fn from_env() -> Self {
        match env::var("APP_ENV").map(|s| s.to_lowercase()).as_deref() {
            Ok("production") => Self::Production,
            Ok("staging") => Self::Staging,
            _ => Self::Development,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-request timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration.
///
/// Without a `url` the service keeps everything in process memory.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            run_migrations: true,
        }
    }
}

/// JWT verification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Shared secret of the identity provider
    pub secret: String,
    /// Expected `iss` claim, if the provider sets one
    #[serde(default)]
    pub issuer: Option<String>,
    /// Lifetime of tokens minted locally (tests and tooling)
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            burst: default_burst(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

/// Proximity detection tuning
#[derive(Debug, Clone, Deserialize)]
pub struct ProximityConfig {
    /// Followed users strictly closer than this are "near"
    #[serde(default = "default_near_km")]
    pub near_km: f64,
    /// Followed users this close or closer are "together"
    #[serde(default = "default_together_km")]
    pub together_km: f64,
    /// Minimum gap between two notifications for the same pair
    #[serde(default = "default_cooldown_hours")]
    pub notification_cooldown_hours: i64,
    /// How old a followed user's location may be and still be listed
    #[serde(default = "default_freshness_minutes")]
    pub location_freshness_minutes: i64,
    /// Radius for counting visits to a place
    #[serde(default = "default_together_km")]
    pub top_places_radius_km: f64,
}

impl Default for ProximityConfig {
    fn default() -> Self {
        Self {
            near_km: default_near_km(),
            together_km: default_together_km(),
            notification_cooldown_hours: default_cooldown_hours(),
            location_freshness_minutes: default_freshness_minutes(),
            top_places_radius_km: default_together_km(),
        }
    }
}

impl ProximityConfig {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            near_km: self.near_km,
            together_km: self.together_km,
        }
    }

    pub fn notification_cooldown(&self) -> Duration {
        Duration::hours(self.notification_cooldown_hours)
    }

    pub fn location_freshness(&self) -> Duration {
        Duration::minutes(self.location_freshness_minutes)
    }
}

// Default value functions
fn default_app_name() -> String {
    "nearby".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_true() -> bool {
    true
}

fn default_access_token_expiry() -> i64 {
    900 // 15 minutes
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_near_km() -> f64 {
    3.0
}

fn default_together_km() -> f64 {
    0.2
}

fn default_cooldown_hours() -> i64 {
    24
}

fn default_freshness_minutes() -> i64 {
    15
}

impl AppConfig {
    /// Load configuration from `./config` and the environment
    ///
    /// # Errors
    /// Returns an error if a source cannot be parsed, a required key is
    /// missing, or the values are inconsistent
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::load_from(Path::new("config"), Environment::from_env())
    }

    /// Load configuration using config files from `dir`
    pub fn load_from(dir: &Path, environment: Environment) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("app.env", environment.as_str())?
            .add_source(File::from(dir.join("default")).required(false))
            .add_source(File::from(dir.join(environment.as_str())).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins"),
            )
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?;

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::InvalidValue("jwt.secret", "must not be empty".into()));
        }

        let p = &self.proximity;
        if !(p.together_km > 0.0 && p.together_km <= p.near_km) {
            return Err(ConfigError::InvalidValue(
                "proximity.together_km",
                format!("must be in (0, near_km = {}]", p.near_km),
            ));
        }
        if p.top_places_radius_km <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "proximity.top_places_radius_km",
                "must be positive".into(),
            ));
        }
        if p.notification_cooldown_hours < 0 || p.location_freshness_minutes <= 0 {
            return Err(ConfigError::InvalidValue(
                "proximity",
                "cooldown must be >= 0 and freshness > 0".into(),
            ));
        }
        if self.snowflake.worker_id >= 1024 {
            return Err(ConfigError::InvalidValue(
                "snowflake.worker_id",
                "must be < 1024".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> Result<AppConfig, ConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_environment_is_production() {
        assert!(!Environment::Development.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_server_address() {
        let config = ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 30,
        };
        assert_eq!(config.address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = from_toml("[jwt]\nsecret = \"s3cret\"").unwrap();

        assert_eq!(config.app.name, "nearby");
        assert_eq!(config.api.port, 8080);
        assert!(config.database.url.is_none());
        assert_eq!(config.proximity.near_km, 3.0);
        assert_eq!(config.proximity.together_km, 0.2);
        assert_eq!(config.proximity.notification_cooldown(), Duration::hours(24));
        assert_eq!(config.proximity.location_freshness(), Duration::minutes(15));
        assert_eq!(config.jwt.access_token_expiry, 900);
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = from_toml(
            r#"
            [app]
            env = "production"

            [jwt]
            secret = "s3cret"
            issuer = "accounts"

            [proximity]
            near_km = 5.0
            notification_cooldown_hours = 12
            "#,
        )
        .unwrap();

        assert!(config.app.env.is_production());
        assert_eq!(config.jwt.issuer.as_deref(), Some("accounts"));
        assert_eq!(config.proximity.thresholds().near_km, 5.0);
        assert_eq!(config.proximity.thresholds().together_km, 0.2);
        assert_eq!(config.proximity.notification_cooldown(), Duration::hours(12));
    }

    #[test]
    fn test_missing_jwt_is_an_error() {
        assert!(matches!(from_toml(""), Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_inconsistent_radii_rejected() {
        let err = from_toml(
            "[jwt]\nsecret = \"x\"\n[proximity]\nnear_km = 0.1\ntogether_km = 0.2",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("proximity.together_km", _)));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let err = from_toml("[jwt]\nsecret = \"  \"").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("jwt.secret", _)));
    }
}
