//! Configuration loading and validation for the service.
//!
//! All values are read from environment variables at startup. The process
//! exits with a clear error message if any required variable is missing or
//! invalid. Encryption secrets are not part of this struct; they are
//! collected separately into the key ring.

use std::fmt;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Validated service configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Base URL of the identity service that resolves bearer tokens. **Required.**
    pub identity_url: String,

    /// Base URL of the record store's REST interface. **Required.**
    pub store_url: String,

    /// Service-role key authenticating this service to both collaborators.
    /// **Required.**
    pub service_key: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_http_port() -> u16 {
    8080
}
fn default_log_level() -> String {
    "info".into()
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

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.identity_url, "IDENTITY_URL")?;
        ensure_non_empty(&self.store_url, "STORE_URL")?;
        ensure_non_empty(&self.service_key, "SERVICE_KEY")?;
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The service key is a credential; keep it out of logs and panics.
        f.debug_struct("Config")
            .field("identity_url", &self.identity_url)
            .field("store_url", &self.store_url)
            .field("service_key", &"[REDACTED]")
            .field("http_port", &self.http_port)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}
