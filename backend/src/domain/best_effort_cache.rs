//! Cache access that can never fail its caller.
//!
//! [`BestEffortCache`] wraps a [`CacheStore`] and turns every adapter error
//! into an "unavailable" outcome plus a `warn` log line. Coordinators receive
//! plain outcomes instead of `Result`s, so a cache outage cannot leak into a
//! response.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use super::ports::{CacheKey, CacheServerStats, CacheStore};

/// Outcome of a cache read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheRead {
    /// A live value was found.
    Hit(String),
    /// The cache answered but holds nothing under the key.
    Miss,
    /// The cache tier could not be reached.
    Unavailable,
}

/// Degrading facade over an injected [`CacheStore`].
#[derive(Clone)]
pub struct BestEffortCache {
    store: Arc<dyn CacheStore>,
}

impl BestEffortCache {
    /// Wrap a cache adapter.
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Read `key`.
    pub async fn get(&self, key: &CacheKey) -> CacheRead {
        match self.store.get(key).await {
            Ok(Some(value)) => CacheRead::Hit(value),
            Ok(None) => CacheRead::Miss,
            Err(err) => {
                warn!(key = %key, error = %err, "cache read degraded");
                CacheRead::Unavailable
            }
        }
    }

    /// Store `value` under `key` for `ttl`; returns whether the write landed.
    pub async fn put(&self, key: &CacheKey, value: &str, ttl: Duration) -> bool {
        match self.store.set_with_ttl(key, value, ttl).await {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %key, error = %err, "cache write degraded");
                false
            }
        }
    }

    /// Remove `key`; returns whether the delete reached the cache.
    pub async fn remove(&self, key: &CacheKey) -> bool {
        match self.store.delete(key).await {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %key, error = %err, "cache delete degraded");
                false
            }
        }
    }

    /// Atomically bump the counter at `key`; `None` when the cache is down.
    pub async fn increment(&self, key: &CacheKey, ttl: Duration) -> Option<u64> {
        match self.store.increment_with_ttl(key, ttl).await {
            Ok(count) => Some(count),
            Err(err) => {
                warn!(key = %key, error = %err, "cache increment degraded");
                None
            }
        }
    }

    /// Backend statistics; `None` when the cache is down.
    pub async fn stats(&self) -> Option<CacheServerStats> {
        match self.store.stats().await {
            Ok(stats) => Some(stats),
            Err(err) => {
                warn!(error = %err, "cache statistics unavailable");
                None
            }
        }
    }
}
