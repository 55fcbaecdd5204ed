//! Client configuration schemas.
//!
//! Configuration is deserialized with the `config` crate from an optional
//! TOML file, an environment-specific overlay, and `ANALYTICS__*`
//! environment variables, in that order of precedence.

pub mod client;
pub mod logging;

use serde::{Deserialize, Serialize};
use validator::Validate;

use self::client::ClientConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Client facade settings.
    #[serde(default)]
    pub client: ClientConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AnalyticsConfig {
    /// Load configuration from `path` plus `config/{env}` and the
    /// environment.
    ///
    /// Missing files are skipped; environment variables use the
    /// `ANALYTICS` prefix with `__` as the section separator, e.g.
    /// `ANALYTICS__CLIENT__WRITE_KEY`.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("ANALYTICS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate every section that carries constraints.
    pub fn validate(&self) -> Result<(), AppError> {
        self.client.validate()?;
        Ok(())
    }
}
