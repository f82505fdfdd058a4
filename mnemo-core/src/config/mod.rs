//! Configuration types. Defaults live in [`defaults`]; every config struct
//! deserializes with `#[serde(default)]` so partial TOML files work.

pub mod defaults;

mod retry_config;

pub use retry_config::RetryConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, MnemoResult};

/// Top-level configuration for the mnemo core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MnemoConfig {
    /// Retry/backoff settings for repository-facing calls.
    pub retry: RetryConfig,
}

impl MnemoConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> MnemoResult<Self> {
        toml::from_str(text).map_err(|e| {
            ConfigError::ParseFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }
}
