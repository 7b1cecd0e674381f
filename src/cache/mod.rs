//! Cache Module
//!
//! The key-value cache contract and the key rules it enforces.

mod adapter;
mod key;
mod stats;


// Re-export public types
pub use adapter::SimpleCache;
pub use key::{validate_key, validate_keys};
pub use stats::CacheStats;
