//! Driven port for the volatile key-value tier.
//!
//! Adapters report failures honestly through [`CacheError`]; the domain never
//! calls this port directly but goes through
//! [`BestEffortCache`](crate::domain::BestEffortCache), which absorbs them.
use std::time::Duration;

use async_trait::async_trait;

use super::{CacheKey, define_port_error};

define_port_error! {
    /// Errors surfaced by cache adapters.
    pub enum CacheError {
        /// No connection could be checked out, or none is configured.
        Unavailable { message: String } => "cache unavailable: {message}",
        /// The backend accepted the connection but the command failed.
        Backend { message: String } => "cache command failed: {message}",
    }
}

/// Server-level figures reported by the cache backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheServerStats {
    pub version: String,
    pub connected_clients: u64,
    pub used_memory_human: String,
    pub total_connections_received: u64,
    /// Number of keys in the selected database.
    pub keyspace: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read the raw value stored under `key`.
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, expiring after `ttl`.
    async fn set_with_ttl(
        &self,
        key: &CacheKey,
        value: &str,
        ttl: Duration,
    ) -> Result<(), CacheError>;

    /// Remove `key`; removing an absent key succeeds.
    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError>;

    /// Whether `key` currently holds a live value.
    async fn exists(&self, key: &CacheKey) -> Result<bool, CacheError>;

    /// Atomically increment the counter at `key` (creating it at 1) and reset
    /// its expiry to `ttl`, returning the new count.
    async fn increment_with_ttl(&self, key: &CacheKey, ttl: Duration) -> Result<u64, CacheError>;

    /// Backend statistics for operational dashboards.
    async fn stats(&self) -> Result<CacheServerStats, CacheError>;
}
