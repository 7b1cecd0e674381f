//! Backend Module
//!
//! The contract a storage backend fulfils so it can sit behind [`SimpleCache`].
//! Storage, expiration and eviction all live on the far side of this trait.
//!
//! [`SimpleCache`]: crate::cache::SimpleCache

mod options;
mod scoped;

#[cfg(test)]
pub(crate) mod test_support;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

pub use options::BackendOptions;
pub use scoped::{ScopedTtl, SharedTtl, TtlGuard};

/// Keys a bulk write or removal could not process.
pub type FailedKeys = HashSet<String>;

// == Cache Backend ==
/// Storage engine the adapter delegates to.
///
/// `ttl` on writes is a per-call override; `None` leaves the backend's
/// configured TTL in effect.
pub trait CacheBackend: Send + Sync {
    /// Type of the stored values
    type Value: Clone;

    /// Options that govern key validation and default TTL.
    fn options(&self) -> &BackendOptions;

    /// Returns the stored value, or `None` on a miss.
    fn get_item(&self, key: &str) -> anyhow::Result<Option<Self::Value>>;

    /// Returns the stored values for the keys that are present.
    fn get_items(&self, keys: &[String]) -> anyhow::Result<HashMap<String, Self::Value>>;

    fn has_item(&self, key: &str) -> anyhow::Result<bool>;

    /// Stores a value; `false` means the backend declined the write.
    fn set_item(&self, key: &str, value: Self::Value, ttl: Option<Duration>)
        -> anyhow::Result<bool>;

    fn set_items(
        &self,
        items: Vec<(String, Self::Value)>,
        ttl: Option<Duration>,
    ) -> anyhow::Result<FailedKeys>;

    fn remove_item(&self, key: &str) -> anyhow::Result<bool>;

    fn remove_items(&self, keys: &[String]) -> anyhow::Result<FailedKeys>;

    /// Flush capability, if the backend has one.
    fn flusher(&self) -> Option<&dyn Flushable> {
        None
    }
}

// == Flushable ==
/// Backends that can drop every entry at once.
pub trait Flushable {
    fn flush(&self) -> anyhow::Result<bool>;
}

impl<B: CacheBackend + ?Sized> CacheBackend for Arc<B> {
    type Value = B::Value;

    fn options(&self) -> &BackendOptions {
        (**self).options()
    }

    fn get_item(&self, key: &str) -> anyhow::Result<Option<Self::Value>> {
        (**self).get_item(key)
    }

    fn get_items(&self, keys: &[String]) -> anyhow::Result<HashMap<String, Self::Value>> {
        (**self).get_items(keys)
    }

    fn has_item(&self, key: &str) -> anyhow::Result<bool> {
        (**self).has_item(key)
    }

    fn set_item(
        &self,
        key: &str,
        value: Self::Value,
        ttl: Option<Duration>,
    ) -> anyhow::Result<bool> {
        (**self).set_item(key, value, ttl)
    }

    fn set_items(
        &self,
        items: Vec<(String, Self::Value)>,
        ttl: Option<Duration>,
    ) -> anyhow::Result<FailedKeys> {
        (**self).set_items(items, ttl)
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<bool> {
        (**self).remove_item(key)
    }

    fn remove_items(&self, keys: &[String]) -> anyhow::Result<FailedKeys> {
        (**self).remove_items(keys)
    }

    fn flusher(&self) -> Option<&dyn Flushable> {
        (**self).flusher()
    }
}
