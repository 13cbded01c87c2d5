//! Configuration loading and validation for the API service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use serde::Deserialize;

/// Validated API service configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// sqlx connection URL of the record store.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Maximum number of pooled store connections.
    #[serde(default = "default_database_max_connections")]
    pub database_max_connections: u32,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Secret for the `userName` column. **Required.**
    pub user_encryption_key: String,

    /// Secret for the `password` column. **Required**, and must differ from
    /// [`Config::user_encryption_key`].
    pub password_encryption_key: String,

    /// The single browser origin allowed to call the API cross-origin.
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database_url() -> String {
    "sqlite://users.db".into()
}
fn default_database_max_connections() -> u32 {
    5
}
fn default_port() -> u16 {
    3000
}
fn default_allowed_origin() -> String {
    "http://localhost:4200".into()
}
fn default_log_level() -> String {
    "info".into()
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("database_max_connections", &self.database_max_connections)
            .field("port", &self.port)
            .field("user_encryption_key", &"[REDACTED]")
            .field("password_encryption_key", &"[REDACTED]")
            .field("allowed_origin", &self.allowed_origin)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The allowed origin as a header value for the CORS layer.
    pub fn allowed_origin_header(&self) -> Result<HeaderValue> {
        HeaderValue::from_str(self.allowed_origin.trim())
            .with_context(|| format!("ALLOWED_ORIGIN is not a valid header value: {}", self.allowed_origin))
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.database_url, "DATABASE_URL")?;
        ensure_non_empty(&self.user_encryption_key, "USER_ENCRYPTION_KEY")?;
        ensure_non_empty(&self.password_encryption_key, "PASSWORD_ENCRYPTION_KEY")?;
        ensure_non_empty(&self.allowed_origin, "ALLOWED_ORIGIN")?;

        if self.user_encryption_key == self.password_encryption_key {
            anyhow::bail!("USER_ENCRYPTION_KEY and PASSWORD_ENCRYPTION_KEY must be distinct");
        }
        if self.database_max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be > 0");
        }
        self.allowed_origin_header()?;
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config {
            database_url: default_database_url(),
            database_max_connections: default_database_max_connections(),
            port: default_port(),
            user_encryption_key: "user-key".into(),
            password_encryption_key: "password-key".into(),
            allowed_origin: default_allowed_origin(),
            log_level: default_log_level(),
        }
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_database_url(), "sqlite://users.db");
        assert_eq!(default_database_max_connections(), 5);
        assert_eq!(default_port(), 3000);
        assert_eq!(default_allowed_origin(), "http://localhost:4200");
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn validate_accepts_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_key() {
        let cfg = Config {
            user_encryption_key: " ".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_password_key() {
        let cfg = Config {
            password_encryption_key: "".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_shared_key() {
        let cfg = Config {
            password_encryption_key: "user-key".into(),
            ..valid()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("distinct"));
    }

    #[test]
    fn validate_rejects_bad_origin() {
        let cfg = Config {
            allowed_origin: "http://bad\norigin".into(),
            ..valid()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn debug_redacts_keys() {
        let printed = format!("{:?}", valid());
        assert!(!printed.contains("user-key"));
        assert!(!printed.contains("password-key"));
        assert!(printed.contains("REDACTED"));
    }
}
