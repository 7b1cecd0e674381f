//! In-memory backend used by unit and property tests.
//!
//! Records the effective TTL of every write and can be told to decline
//! keys, fail outright, or panic mid-write.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::anyhow;
use parking_lot::Mutex;

use crate::backend::{BackendOptions, CacheBackend, FailedKeys, Flushable, SharedTtl};

pub(crate) struct MemoryBackend<V = i64> {
    options: BackendOptions,
    entries: Mutex<HashMap<String, V>>,
    configured_ttl: Mutex<Option<Duration>>,
    writes: Mutex<Vec<(String, Option<Duration>)>>,
    failing: Mutex<HashSet<String>>,
    broken: AtomicBool,
    panic_on_write: AtomicBool,
    flush_supported: bool,
    calls: AtomicUsize,
}

impl MemoryBackend {
    pub(crate) fn new() -> Self {
        Self::with_options(BackendOptions::new())
    }
}

impl<V> MemoryBackend<V> {
    pub(crate) fn with_options(options: BackendOptions) -> Self {
        Self {
            configured_ttl: Mutex::new(options.default_ttl),
            options,
            entries: Mutex::new(HashMap::new()),
            writes: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
            broken: AtomicBool::new(false),
            panic_on_write: AtomicBool::new(false),
            flush_supported: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn flushable(mut self) -> Self {
        self.flush_supported = true;
        self
    }

    pub(crate) fn fail_key(&self, key: &str) {
        self.failing.lock().insert(key.to_string());
    }

    pub(crate) fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::SeqCst);
    }

    pub(crate) fn set_panic_on_write(&self, panic: bool) {
        self.panic_on_write.store(panic, Ordering::SeqCst);
    }

    /// Key and effective TTL of every accepted write, in order.
    pub(crate) fn writes(&self) -> Vec<(String, Option<Duration>)> {
        self.writes.lock().clone()
    }

    /// Number of backend calls made so far.
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.lock().len()
    }

    fn enter(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken.load(Ordering::SeqCst) {
            return Err(anyhow!("backend unavailable"));
        }
        Ok(())
    }

    fn enter_write(&self) -> anyhow::Result<()> {
        self.enter()?;
        if self.panic_on_write.load(Ordering::SeqCst) {
            panic!("backend panicked during write");
        }
        Ok(())
    }

    fn store(&self, key: &str, value: V, ttl: Option<Duration>) -> bool {
        if self.failing.lock().contains(key) {
            return false;
        }
        let effective = ttl.or(*self.configured_ttl.lock());
        self.entries.lock().insert(key.to_string(), value);
        self.writes.lock().push((key.to_string(), effective));
        true
    }
}

impl<V: Clone + Send + Sync> CacheBackend for MemoryBackend<V> {
    type Value = V;

    fn options(&self) -> &BackendOptions {
        &self.options
    }

    fn get_item(&self, key: &str) -> anyhow::Result<Option<V>> {
        self.enter()?;
        Ok(self.entries.lock().get(key).cloned())
    }

    fn get_items(&self, keys: &[String]) -> anyhow::Result<HashMap<String, V>> {
        self.enter()?;
        let entries = self.entries.lock();
        Ok(keys
            .iter()
            .filter_map(|key| entries.get(key).map(|v| (key.clone(), v.clone())))
            .collect())
    }

    fn has_item(&self, key: &str) -> anyhow::Result<bool> {
        self.enter()?;
        Ok(self.entries.lock().contains_key(key))
    }

    fn set_item(&self, key: &str, value: V, ttl: Option<Duration>) -> anyhow::Result<bool> {
        self.enter_write()?;
        Ok(self.store(key, value, ttl))
    }

    fn set_items(
        &self,
        items: Vec<(String, V)>,
        ttl: Option<Duration>,
    ) -> anyhow::Result<FailedKeys> {
        self.enter_write()?;
        Ok(items
            .into_iter()
            .filter_map(|(key, value)| (!self.store(&key, value, ttl)).then_some(key))
            .collect())
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<bool> {
        self.enter()?;
        if self.failing.lock().contains(key) {
            return Ok(false);
        }
        Ok(self.entries.lock().remove(key).is_some())
    }

    fn remove_items(&self, keys: &[String]) -> anyhow::Result<FailedKeys> {
        self.enter()?;
        let failing = self.failing.lock();
        let mut entries = self.entries.lock();
        Ok(keys
            .iter()
            .filter(|key| {
                if failing.contains(*key) {
                    return true;
                }
                entries.remove(*key);
                false
            })
            .cloned()
            .collect())
    }

    fn flusher(&self) -> Option<&dyn Flushable> {
        self.flush_supported.then_some(self as &dyn Flushable)
    }
}

impl<V> Flushable for MemoryBackend<V> {
    fn flush(&self) -> anyhow::Result<bool> {
        self.enter()?;
        self.entries.lock().clear();
        Ok(true)
    }
}

impl<V> SharedTtl for MemoryBackend<V> {
    fn ttl(&self) -> Option<Duration> {
        *self.configured_ttl.lock()
    }

    fn set_ttl(&self, ttl: Option<Duration>) {
        *self.configured_ttl.lock() = ttl;
    }
}
