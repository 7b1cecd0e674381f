//! Simple Cache - a key-value cache contract over a pluggable storage backend
//!
//! Validates keys, substitutes defaults on a miss and carries per-write TTL
//! overrides; storage, expiry and eviction are left to the backend.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;

pub use backend::{BackendOptions, CacheBackend, FailedKeys, Flushable, ScopedTtl, SharedTtl};
pub use cache::{CacheStats, SimpleCache};
pub use config::Config;
pub use error::{CacheError, Result};
