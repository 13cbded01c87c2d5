//! Configuration loading and validation for the `users` front end.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Base URL of the API, without the `/users` suffix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout for API calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Tracing log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_base_url() -> String {
    "http://localhost:3000".into()
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_log_level() -> String {
    "warn".into()
}

impl Config {
    /// Load configuration from environment variables, letting `api_override`
    /// (the `--api` flag) replace `API_BASE_URL`.
    pub fn from_env(api_override: Option<String>) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .set_override_option("api_base_url", api_override)
            .context("failed to apply --api override")?
            .build()
            .context("failed to build client configuration")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise client configuration")?;

        c.validate()?;
        Ok(c)
    }

    fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            anyhow::bail!("API_BASE_URL is required and must not be empty");
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("API_BASE_URL must start with http:// or https://");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be greater than zero");
        }
        Ok(())
    }
}
