//! Configuration management for Tollgate.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, TollgateError};
use crate::ratelimit::Limit;

/// Settings used to build a [`Limit`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimiterConfig {
    /// Requests allowed per window
    #[serde(default = "default_count")]
    pub count: u64,

    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            count: default_count(),
            window_secs: default_window_secs(),
        }
    }
}

fn default_count() -> u64 {
    2
}

fn default_window_secs() -> u64 {
    1
}

impl LimiterConfig {
    /// Window length as a `Duration`.
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Build the limit described by this configuration.
    pub fn to_limit(&self) -> Result<Limit> {
        Limit::new(self.count, self.window()).map_err(|e| {
            TollgateError::Config(format!("window_secs = {}: {}", self.window_secs, e))
        })
    }
}
