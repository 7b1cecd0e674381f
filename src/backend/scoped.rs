//! Scoped TTL Module
//!
//! Support for backends that keep their TTL as shared, mutable configuration
//! instead of accepting it per write. The override is applied for exactly one
//! write and the previous value is put back on every exit path.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::debug;

use crate::backend::{BackendOptions, CacheBackend, FailedKeys, Flushable};

// == Shared TTL ==
/// Backends whose TTL is a single configuration value shared by all writers.
pub trait SharedTtl {
    fn ttl(&self) -> Option<Duration>;

    fn set_ttl(&self, ttl: Option<Duration>);
}

// == TTL Guard ==
/// Applies a TTL override and restores the previous TTL when dropped.
///
/// Restoration runs on normal return, on early return through `?` and
/// during unwinding.
#[must_use = "the previous TTL is restored as soon as the guard is dropped"]
pub struct TtlGuard<'a, T: SharedTtl + ?Sized> {
    target: &'a T,
    previous: Option<Duration>,
}

impl<'a, T: SharedTtl + ?Sized> TtlGuard<'a, T> {
    /// Saves the current TTL and applies `ttl` if one is given.
    ///
    /// A `None` override leaves the configured TTL untouched.
    pub fn apply(target: &'a T, ttl: Option<Duration>) -> Self {
        let previous = target.ttl();
        if let Some(ttl) = ttl {
            debug!(?previous, override_ttl = ?ttl, "Applying TTL override");
            target.set_ttl(Some(ttl));
        }
        Self { target, previous }
    }

    /// TTL that will be restored on drop.
    pub fn previous(&self) -> Option<Duration> {
        self.previous
    }
}

impl<T: SharedTtl + ?Sized> Drop for TtlGuard<'_, T> {
    fn drop(&mut self) {
        self.target.set_ttl(self.previous);
    }
}

// == Scoped TTL Backend ==
/// Wraps a shared-TTL backend so it accepts per-call TTL overrides.
///
/// Writes through one `ScopedTtl` are serialized, so concurrent writers never
/// observe each other's override. Writes that bypass the wrapper and go to the
/// inner backend directly are not covered.
pub struct ScopedTtl<B> {
    inner: B,
    write_lock: Mutex<()>,
}

impl<B> ScopedTtl<B>
where
    B: CacheBackend + SharedTtl,
{
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            write_lock: Mutex::new(()),
        }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B> CacheBackend for ScopedTtl<B>
where
    B: CacheBackend + SharedTtl,
{
    type Value = B::Value;

    fn options(&self) -> &BackendOptions {
        self.inner.options()
    }

    fn get_item(&self, key: &str) -> anyhow::Result<Option<Self::Value>> {
        self.inner.get_item(key)
    }

    fn get_items(&self, keys: &[String]) -> anyhow::Result<HashMap<String, Self::Value>> {
        self.inner.get_items(keys)
    }

    fn has_item(&self, key: &str) -> anyhow::Result<bool> {
        self.inner.has_item(key)
    }

    fn set_item(
        &self,
        key: &str,
        value: Self::Value,
        ttl: Option<Duration>,
    ) -> anyhow::Result<bool> {
        // Guard is declared after the lock so it drops (restores) first.
        let _lock = self.write_lock.lock();
        let _guard = TtlGuard::apply(&self.inner, ttl);
        self.inner.set_item(key, value, None)
    }

    fn set_items(
        &self,
        items: Vec<(String, Self::Value)>,
        ttl: Option<Duration>,
    ) -> anyhow::Result<FailedKeys> {
        let _lock = self.write_lock.lock();
        let _guard = TtlGuard::apply(&self.inner, ttl);
        self.inner.set_items(items, None)
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<bool> {
        self.inner.remove_item(key)
    }

    fn remove_items(&self, keys: &[String]) -> anyhow::Result<FailedKeys> {
        self.inner.remove_items(keys)
    }

    fn flusher(&self) -> Option<&dyn Flushable> {
        self.inner.flusher()
    }
}
