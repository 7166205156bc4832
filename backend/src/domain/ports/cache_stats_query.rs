//! Driving port reporting the health of the cache tier.

use async_trait::async_trait;

use super::CacheServerStats;

/// Reachability of the cache tier at the time of asking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheStatus {
    Connected(CacheServerStats),
    Unavailable,
}

/// Domain use-case port for cache diagnostics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStatsQuery: Send + Sync {
    /// Current cache status; an unreachable cache is a status, not an error.
    async fn cache_status(&self) -> CacheStatus;
}
