//! Cache diagnostics backed by the best-effort cache.

use async_trait::async_trait;

use super::BestEffortCache;
use super::ports::{CacheStatsQuery, CacheStatus};

/// [`CacheStatsQuery`] implementation reporting outages as a status.
#[derive(Clone)]
pub struct CacheStatsService {
    cache: BestEffortCache,
}

impl CacheStatsService {
    pub fn new(cache: BestEffortCache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl CacheStatsQuery for CacheStatsService {
    async fn cache_status(&self) -> CacheStatus {
        self.cache
            .stats()
            .await
            .map_or(CacheStatus::Unavailable, CacheStatus::Connected)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{CacheError, CacheServerStats, MockCacheStore};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn outage_is_reported_as_unavailable() {
        let mut store = MockCacheStore::new();
        store
            .expect_stats()
            .return_once(|| Err(CacheError::unavailable("refused")));

        let service = CacheStatsService::new(BestEffortCache::new(Arc::new(store)));
        assert_eq!(service.cache_status().await, CacheStatus::Unavailable);
    }

    #[rstest]
    #[tokio::test]
    async fn connected_status_carries_server_figures() {
        let stats = CacheServerStats {
            version: "7.2.4".to_owned(),
            connected_clients: 3,
            used_memory_human: "1.05M".to_owned(),
            total_connections_received: 42,
            keyspace: 2,
        };
        let expected = stats.clone();
        let mut store = MockCacheStore::new();
        store.expect_stats().return_once(move || Ok(stats));

        let service = CacheStatsService::new(BestEffortCache::new(Arc::new(store)));
        assert_eq!(service.cache_status().await, CacheStatus::Connected(expected));
    }
}
