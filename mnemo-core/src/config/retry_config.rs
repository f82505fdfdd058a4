use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Retry/backoff configuration for repository-facing calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    pub initial_delay_ms: u64,
    /// Upper bound on any single inter-retry delay, in milliseconds.
    pub max_delay_ms: u64,
    /// Multiplier applied to the delay after each retry.
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: defaults::DEFAULT_MAX_RETRIES,
            initial_delay_ms: defaults::DEFAULT_INITIAL_DELAY_MS,
            max_delay_ms: defaults::DEFAULT_MAX_DELAY_MS,
            backoff_multiplier: defaults::DEFAULT_BACKOFF_MULTIPLIER,
        }
    }
}

impl RetryConfig {
    /// Delay before the first retry.
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Cap applied to every inter-retry delay.
    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}
