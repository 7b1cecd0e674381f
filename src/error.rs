//! Error types for the cache adapter
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache adapter.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key is empty or does not match the configured pattern
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Configured key pattern is not a valid regular expression
    #[error("Invalid key pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Error raised by the storage backend, passed through untouched
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl CacheError {
    /// Returns true if this error was produced by key validation.
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, CacheError::InvalidKey(_))
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache adapter.
pub type Result<T> = std::result::Result<T, CacheError>;
