//! Configuration Module
//!
//! Handles loading adapter configuration from environment variables.

use std::env;

use serde::Deserialize;

/// Adapter configuration parameters.
///
/// All values can be configured via environment variables; both are off by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Regular expression every key must match, if any
    #[serde(default)]
    pub key_pattern: Option<String>,
    /// Default TTL in seconds applied by the backend when a write carries none
    #[serde(default)]
    pub default_ttl: Option<u64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_KEY_PATTERN` - Key validation regex (default: none)
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds, `0` disables it (default: none)
    pub fn from_env() -> Self {
        Self {
            key_pattern: env::var("CACHE_KEY_PATTERN")
                .ok()
                .filter(|v| !v.is_empty()),
            default_ttl: env::var("CACHE_DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl| *ttl > 0),
        }
    }
}
