//! In-memory cache adapters.
//!
//! [`InMemoryCacheStore`] honours TTLs against an injected [`Clock`] and can
//! be switched offline to simulate an outage. [`UnreachableCacheStore`] fails
//! every call the way an unreachable Redis does.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{CacheError, CacheKey, CacheServerStats, CacheStore};

struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Volatile key-value store with per-key expiry.
pub struct InMemoryCacheStore {
    clock: Arc<dyn Clock>,
    entries: Mutex<HashMap<String, Entry>>,
    online: AtomicBool,
}

impl InMemoryCacheStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            entries: Mutex::new(HashMap::new()),
            online: AtomicBool::new(true),
        }
    }

    /// Simulate the cache tier going down (`false`) or recovering (`true`).
    /// Stored entries survive an outage.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Live raw value under `key`, bypassing the outage switch.
    pub fn peek(&self, key: &str) -> Option<String> {
        let now = self.clock.utc();
        self.lock_entries()
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone())
    }

    /// Remaining lifetime of `key`, if live.
    pub fn remaining_ttl(&self, key: &str) -> Option<Duration> {
        let now = self.clock.utc();
        self.lock_entries()
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .and_then(|entry| (entry.expires_at - now).to_std().ok())
    }

    /// Overwrite `key` with an arbitrary raw value, e.g. a corrupt snapshot.
    pub fn insert_raw(&self, key: &str, value: &str, ttl: Duration) {
        let expires_at = self.expiry(ttl);
        self.lock_entries().insert(
            key.to_owned(),
            Entry {
                value: value.to_owned(),
                expires_at,
            },
        );
    }

    fn ensure_online(&self) -> Result<(), CacheError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CacheError::unavailable("connection refused"))
        }
    }

    fn expiry(&self, ttl: Duration) -> DateTime<Utc> {
        let delta = TimeDelta::from_std(ttl).unwrap_or_else(|_| TimeDelta::weeks(52 * 100));
        self.clock
            .utc()
            .checked_add_signed(delta)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("cache entries mutex"),
        }
    }

    fn purge_expired(&self, entries: &mut HashMap<String, Entry>) {
        let now = self.clock.utc();
        entries.retain(|_, entry| entry.expires_at > now);
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        self.ensure_online()?;
        Ok(self.peek(key.as_str()))
    }

    async fn set_with_ttl(
        &self,
        key: &CacheKey,
        value: &str,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.ensure_online()?;
        self.insert_raw(key.as_str(), value, ttl);
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError> {
        self.ensure_online()?;
        self.lock_entries().remove(key.as_str());
        Ok(())
    }

    async fn exists(&self, key: &CacheKey) -> Result<bool, CacheError> {
        self.ensure_online()?;
        Ok(self.peek(key.as_str()).is_some())
    }

    async fn increment_with_ttl(&self, key: &CacheKey, ttl: Duration) -> Result<u64, CacheError> {
        self.ensure_online()?;
        let expires_at = self.expiry(ttl);
        let mut entries = self.lock_entries();
        self.purge_expired(&mut entries);
        let current = match entries.get(key.as_str()) {
            Some(entry) => entry
                .value
                .parse::<u64>()
                .map_err(|_| CacheError::backend("value is not an integer or out of range"))?,
            None => 0,
        };
        let next = current + 1;
        entries.insert(
            key.as_str().to_owned(),
            Entry {
                value: next.to_string(),
                expires_at,
            },
        );
        Ok(next)
    }

    async fn stats(&self) -> Result<CacheServerStats, CacheError> {
        self.ensure_online()?;
        let mut entries = self.lock_entries();
        self.purge_expired(&mut entries);
        Ok(CacheServerStats {
            version: "in-memory".to_owned(),
            connected_clients: 1,
            used_memory_human: "0B".to_owned(),
            total_connections_received: 1,
            keyspace: u64::try_from(entries.len()).unwrap_or(u64::MAX),
        })
    }
}

/// Cache adapter whose every call fails as unreachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreachableCacheStore;

fn unreachable_cache() -> CacheError {
    CacheError::unavailable("connection refused")
}

#[async_trait]
impl CacheStore for UnreachableCacheStore {
    async fn get(&self, _key: &CacheKey) -> Result<Option<String>, CacheError> {
        Err(unreachable_cache())
    }

    async fn set_with_ttl(
        &self,
        _key: &CacheKey,
        _value: &str,
        _ttl: Duration,
    ) -> Result<(), CacheError> {
        Err(unreachable_cache())
    }

    async fn delete(&self, _key: &CacheKey) -> Result<(), CacheError> {
        Err(unreachable_cache())
    }

    async fn exists(&self, _key: &CacheKey) -> Result<bool, CacheError> {
        Err(unreachable_cache())
    }

    async fn increment_with_ttl(&self, _key: &CacheKey, _ttl: Duration) -> Result<u64, CacheError> {
        Err(unreachable_cache())
    }

    async fn stats(&self) -> Result<CacheServerStats, CacheError> {
        Err(unreachable_cache())
    }
}
