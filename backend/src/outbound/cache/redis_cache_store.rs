//! Redis-backed [`CacheStore`] adapter.
//!
//! Every command runs under a deadline; a checkout failure, I/O error, or
//! expired deadline is reported as [`CacheError::Unavailable`] so the domain
//! degrades instead of hanging.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use bb8_redis::redis::{self, AsyncCommands, RedisError};
use tokio::time::timeout;

use crate::domain::ports::{CacheError, CacheKey, CacheServerStats, CacheStore};

use super::redis_pool::{RedisPool, RedisPoolError};

/// Redis implementation of the cache port.
#[derive(Clone)]
pub struct RedisCacheStore {
    pool: RedisPool,
    command_timeout: Duration,
}

impl RedisCacheStore {
    /// Wrap a pool; each command is abandoned after `command_timeout`.
    pub fn new(pool: RedisPool, command_timeout: Duration) -> Self {
        Self {
            pool,
            command_timeout,
        }
    }

    async fn run<T, F>(&self, command: &'static str, fut: F) -> Result<T, CacheError>
    where
        F: Future<Output = Result<T, CacheError>>,
    {
        timeout(self.command_timeout, fut).await.unwrap_or_else(|_| {
            Err(CacheError::unavailable(format!(
                "{command} timed out after {}ms",
                self.command_timeout.as_millis()
            )))
        })
    }
}

fn map_pool_error(err: RedisPoolError) -> CacheError {
    CacheError::unavailable(err.to_string())
}

fn map_redis_error(command: &'static str, err: RedisError) -> CacheError {
    if err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal() {
        CacheError::unavailable(format!("{command}: {err}"))
    } else {
        CacheError::backend(format!("{command}: {err}"))
    }
}

fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<String>, CacheError> {
        self.run("GET", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            conn.get(key.as_str())
                .await
                .map_err(|err| map_redis_error("GET", err))
        })
        .await
    }

    async fn set_with_ttl(
        &self,
        key: &CacheKey,
        value: &str,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        self.run("SETEX", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            conn.set_ex(key.as_str(), value, ttl_seconds(ttl))
                .await
                .map_err(|err| map_redis_error("SETEX", err))
        })
        .await
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), CacheError> {
        self.run("DEL", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let _removed: u64 = conn
                .del(key.as_str())
                .await
                .map_err(|err| map_redis_error("DEL", err))?;
            Ok(())
        })
        .await
    }

    async fn exists(&self, key: &CacheKey) -> Result<bool, CacheError> {
        self.run("EXISTS", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            conn.exists(key.as_str())
                .await
                .map_err(|err| map_redis_error("EXISTS", err))
        })
        .await
    }

    async fn increment_with_ttl(&self, key: &CacheKey, ttl: Duration) -> Result<u64, CacheError> {
        let seconds = i64::try_from(ttl_seconds(ttl)).unwrap_or(i64::MAX);
        self.run("MULTI INCR EXPIRE", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let (count,): (u64,) = redis::pipe()
                .atomic()
                .incr(key.as_str(), 1_u64)
                .expire(key.as_str(), seconds)
                .ignore()
                .query_async(&mut *conn)
                .await
                .map_err(|err| map_redis_error("MULTI INCR EXPIRE", err))?;
            Ok(count)
        })
        .await
    }

    async fn stats(&self) -> Result<CacheServerStats, CacheError> {
        self.run("INFO", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let info: String = redis::cmd("INFO")
                .query_async(&mut *conn)
                .await
                .map_err(|err| map_redis_error("INFO", err))?;
            let keyspace: u64 = redis::cmd("DBSIZE")
                .query_async(&mut *conn)
                .await
                .map_err(|err| map_redis_error("DBSIZE", err))?;
            Ok(parse_info(&info, keyspace))
        })
        .await
    }
}

/// Extract the reported figures from an `INFO` payload.
fn parse_info(info: &str, keyspace: u64) -> CacheServerStats {
    let mut stats = CacheServerStats {
        keyspace,
        ..CacheServerStats::default()
    };
    let fields = info
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'));
    for (name, value) in fields {
        match name {
            "redis_version" => stats.version = value.to_owned(),
            "connected_clients" => stats.connected_clients = value.parse().unwrap_or_default(),
            "used_memory_human" => stats.used_memory_human = value.to_owned(),
            "total_connections_received" => {
                stats.total_connections_received = value.parse().unwrap_or_default();
            }
            _ => {}
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::cache::RedisPoolConfig;
    use rstest::rstest;

    const INFO: &str = "# Server\r\nredis_version:7.2.4\r\nredis_mode:standalone\r\n\r\n\
# Clients\r\nconnected_clients:3\r\n\r\n# Memory\r\nused_memory:1100000\r\n\
used_memory_human:1.05M\r\n\r\n# Stats\r\ntotal_connections_received:42\r\n";

    #[rstest]
    fn parses_reported_fields() {
        let stats = parse_info(INFO, 2);
        assert_eq!(
            stats,
            CacheServerStats {
                version: "7.2.4".to_owned(),
                connected_clients: 3,
                used_memory_human: "1.05M".to_owned(),
                total_connections_received: 42,
                keyspace: 2,
            }
        );
    }

    #[rstest]
    fn unparsable_counters_default_to_zero() {
        let stats = parse_info("connected_clients:lots\r\n", 0);
        assert_eq!(stats.connected_clients, 0);
    }

    #[rstest]
    #[case(Duration::from_millis(10), 1)]
    #[case(Duration::from_secs(30), 30)]
    fn ttl_is_rounded_to_at_least_one_second(#[case] ttl: Duration, #[case] expected: u64) {
        assert_eq!(ttl_seconds(ttl), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_server_reports_unavailable() {
        let config = RedisPoolConfig::new("redis://127.0.0.1:1/")
            .with_connection_timeout(Duration::from_millis(100));
        let pool = RedisPool::new(&config).expect("pool builds lazily");
        let store = RedisCacheStore::new(pool, Duration::from_millis(500));

        let err = store
            .get(&CacheKey::users_list())
            .await
            .expect_err("nothing listens on port 1");
        assert!(matches!(err, CacheError::Unavailable { .. }));
    }
}
