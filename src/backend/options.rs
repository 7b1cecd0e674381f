//! Backend Options Module
//!
//! Configuration a storage backend exposes to the adapter.

use std::time::Duration;

use regex::Regex;

use crate::config::Config;
use crate::error::Result;

// == Backend Options ==
/// Key validation pattern and default TTL advertised by a backend.
#[derive(Debug, Clone, Default)]
pub struct BackendOptions {
    /// Pattern every key must match; `None` accepts any non-empty key
    pub key_pattern: Option<Regex>,
    /// TTL the backend applies when a write carries no override
    pub default_ttl: Option<Duration>,
}

impl BackendOptions {
    // == Constructor ==
    /// Creates options with no key pattern and no default TTL.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds options from adapter configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let options = match config.key_pattern.as_deref() {
            Some(pattern) => Self::new().with_key_pattern(pattern)?,
            None => Self::new(),
        };
        Ok(options.with_default_ttl(config.default_ttl.map(Duration::from_secs)))
    }

    /// Sets the key pattern. An empty pattern clears it.
    pub fn with_key_pattern(mut self, pattern: &str) -> Result<Self> {
        self.key_pattern = if pattern.is_empty() {
            None
        } else {
            Some(Regex::new(pattern)?)
        };
        Ok(self)
    }

    /// Sets the default TTL.
    pub fn with_default_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.default_ttl = ttl;
        self
    }
}
