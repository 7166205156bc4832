//! Cache adapter used when no cache tier is configured.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::{CacheError, CacheKey, CacheServerStats, CacheStore};

const REASON: &str = "no cache configured";

/// [`CacheStore`] that reports every operation as unavailable.
///
/// The domain treats this exactly like an unreachable Redis: reads go to the
/// durable store and lockouts are not enforced.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledCacheStore;

#[async_trait]
impl CacheStore for DisabledCacheStore {
    async fn get(&self, _key: &CacheKey) -> Result<Option<String>, CacheError> {
        Err(CacheError::unavailable(REASON))
    }

    async fn set_with_ttl(
        &self,
        _key: &CacheKey,
        _value: &str,
        _ttl: Duration,
    ) -> Result<(), CacheError> {
        Err(CacheError::unavailable(REASON))
    }

    async fn delete(&self, _key: &CacheKey) -> Result<(), CacheError> {
        Err(CacheError::unavailable(REASON))
    }

    async fn exists(&self, _key: &CacheKey) -> Result<bool, CacheError> {
        Err(CacheError::unavailable(REASON))
    }

    async fn increment_with_ttl(&self, _key: &CacheKey, _ttl: Duration) -> Result<u64, CacheError> {
        Err(CacheError::unavailable(REASON))
    }

    async fn stats(&self) -> Result<CacheServerStats, CacheError> {
        Err(CacheError::unavailable(REASON))
    }
}
