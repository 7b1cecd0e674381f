//! Cache Adapter Module
//!
//! Exposes a storage backend through a simple key-value cache contract:
//! keys are validated before any backend call, misses fall back to a caller
//! supplied default, and TTL overrides travel with each write.

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::backend::CacheBackend;
use crate::cache::key;
use crate::cache::stats::{CacheStats, StatsRecorder};
use crate::error::Result;

// == Simple Cache ==
/// Key-value cache over an injected [`CacheBackend`].
///
/// Backend errors are returned unchanged as [`CacheError::Backend`]; writes
/// the backend merely declines come back as `Ok(false)`.
///
/// [`CacheError::Backend`]: crate::error::CacheError::Backend
pub struct SimpleCache<B: CacheBackend> {
    backend: B,
    stats: StatsRecorder,
}

impl<B: CacheBackend> SimpleCache<B> {
    // == Constructor ==
    /// Creates an adapter over the given backend.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            stats: StatsRecorder::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    // == Validation ==
    /// Checks a key against the backend's key rules.
    pub fn validate_key(&self, key: &str) -> Result<()> {
        if let Err(err) = key::validate_key(key, self.backend.options().key_pattern.as_ref()) {
            self.stats.record_rejected_key();
            warn!(%err, "Rejected cache key");
            return Err(err);
        }
        Ok(())
    }

    /// Checks every key and fails on the first invalid one.
    pub fn validate_keys<I, K>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter()
            .try_for_each(|key| self.validate_key(key.as_ref()))
    }

    // == Lookup ==
    /// Retrieves a value, telling a hit apart from a miss.
    ///
    /// A stored value that is itself "empty" (a JSON `null`, an `Option::None`)
    /// is still a hit.
    pub fn lookup(&self, key: &str) -> Result<Option<B::Value>> {
        self.validate_key(key)?;

        let value = self.backend.get_item(key)?;
        if value.is_some() {
            self.stats.record_hits(1);
            debug!(key, "Cache hit");
        } else {
            self.stats.record_misses(1);
            debug!(key, "Cache miss");
        }
        Ok(value)
    }

    // == Get ==
    /// Retrieves a value, or `default` on a miss.
    pub fn get(&self, key: &str, default: B::Value) -> Result<B::Value> {
        Ok(self.lookup(key)?.unwrap_or(default))
    }

    // == Get Multiple ==
    /// Retrieves several values at once.
    ///
    /// The result holds one entry per distinct requested key, in request
    /// order; missing keys map to a clone of `default`.
    pub fn get_multiple<I, K>(&self, keys: I, default: B::Value) -> Result<Vec<(String, B::Value)>>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        self.validate_keys(&keys)?;

        let mut seen = HashSet::with_capacity(keys.len());
        let requested: Vec<String> = keys
            .into_iter()
            .filter(|key| seen.insert(key.clone()))
            .collect();

        let mut found = self.backend.get_items(&requested)?;
        let mut hits = 0;
        let values: Vec<(String, B::Value)> = requested
            .into_iter()
            .map(|key| match found.remove(&key) {
                Some(value) => {
                    hits += 1;
                    (key, value)
                }
                None => (key, default.clone()),
            })
            .collect();

        let misses = values.len() as u64 - hits;
        self.stats.record_hits(hits);
        self.stats.record_misses(misses);
        debug!(requested = values.len(), hits, misses, "Bulk lookup");

        Ok(values)
    }

    // == Has ==
    /// Reports whether the backend holds a value for `key`.
    ///
    /// The answer can be stale by the time it is used: another writer may
    /// remove or expire the entry, so a `true` here does not promise that a
    /// following [`get`](Self::get) will hit.
    pub fn has(&self, key: &str) -> Result<bool> {
        self.validate_key(key)?;
        Ok(self.backend.has_item(key)?)
    }

    // == Set ==
    /// Stores a value, optionally overriding the backend TTL for this write.
    ///
    /// Returns the backend's verdict. The backend's configured TTL is the same
    /// after the call as before, whatever the outcome.
    pub fn set(&self, key: &str, value: B::Value, ttl: Option<Duration>) -> Result<bool> {
        self.validate_key(key)?;

        if let Some(ttl) = ttl {
            debug!(key, ?ttl, "Writing with TTL override");
        }
        let stored = self.backend.set_item(key, value, ttl)?;
        if !stored {
            warn!(key, "Backend declined write");
        }
        Ok(stored)
    }

    // == Set Multiple ==
    /// Stores several values with one TTL override.
    ///
    /// All keys are validated before the backend is touched. Returns `true`
    /// only if the backend reports no failed keys.
    pub fn set_multiple<I, K>(&self, values: I, ttl: Option<Duration>) -> Result<bool>
    where
        I: IntoIterator<Item = (K, B::Value)>,
        K: Into<String>,
    {
        let items: Vec<(String, B::Value)> = values
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        self.validate_keys(items.iter().map(|(key, _)| key))?;

        let failed = self.backend.set_items(items, ttl)?;
        if !failed.is_empty() {
            warn!(failed = failed.len(), "Bulk write reported failed keys");
        }
        Ok(failed.is_empty())
    }

    // == Delete ==
    /// Removes a value and returns the backend's result as-is.
    ///
    /// Unlike [`delete_multiple`](Self::delete_multiple), nothing is
    /// reinterpreted here: backends commonly answer `false` for a key that
    /// was not present.
    pub fn delete(&self, key: &str) -> Result<bool> {
        self.validate_key(key)?;
        Ok(self.backend.remove_item(key)?)
    }

    // == Delete Multiple ==
    /// Removes several values. Returns `true` only if the backend reports no
    /// failed removals.
    pub fn delete_multiple<I, K>(&self, keys: I) -> Result<bool>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        self.validate_keys(&keys)?;

        let failed = self.backend.remove_items(&keys)?;
        if !failed.is_empty() {
            warn!(failed = failed.len(), "Bulk delete reported failed keys");
        }
        Ok(failed.is_empty())
    }

    // == Clear ==
    /// Flushes the backend.
    ///
    /// Returns `Ok(false)` when the backend cannot flush; use
    /// [`supports_clear`](Self::supports_clear) to tell that apart from a
    /// flush that failed.
    pub fn clear(&self) -> Result<bool> {
        match self.backend.flusher() {
            Some(flusher) => {
                let cleared = flusher.flush()?;
                if cleared {
                    info!("Cache cleared");
                }
                Ok(cleared)
            }
            None => {
                debug!("Backend does not support flushing");
                Ok(false)
            }
        }
    }

    pub fn supports_clear(&self) -> bool {
        self.backend.flusher().is_some()
    }

    // == Stats ==
    /// Returns current adapter statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}
