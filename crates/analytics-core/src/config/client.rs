//! Client facade configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings for the `Analytics` facade.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientConfig {
    /// Source write key identifying the project events belong to.
    #[serde(default)]
    #[validate(length(min = 1, message = "writeKey cannot be null or empty"))]
    pub write_key: String,
    /// Library name reported in `context.library.name`.
    #[serde(default = "default_library_name")]
    #[validate(length(min = 1))]
    pub library_name: String,
    /// Library version reported in `context.library.version`.
    #[serde(default = "default_library_version")]
    pub library_version: String,
    /// Integrations enabled or disabled on every message unless the
    /// message already names them.
    #[serde(default)]
    pub default_integrations: BTreeMap<String, bool>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            write_key: String::new(),
            library_name: default_library_name(),
            library_version: default_library_version(),
            default_integrations: BTreeMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a configuration with the given write key and defaults
    /// for everything else.
    pub fn with_write_key(write_key: impl Into<String>) -> Self {
        Self {
            write_key: write_key.into(),
            ..Self::default()
        }
    }
}

fn default_library_name() -> String {
    "analytics-rs".to_string()
}

fn default_library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
