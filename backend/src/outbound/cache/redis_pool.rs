//! `bb8` pool of multiplexed Redis connections.
//!
//! The pool is built without opening connections, so a cache that is down at
//! startup does not stop the service; each checkout fails fast instead and
//! the caller degrades.

use std::time::Duration;

use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection};

/// Errors raised by the Redis pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RedisPoolError {
    /// The connection URL could not be parsed.
    #[error("invalid redis url: {message}")]
    InvalidUrl { message: String },
    /// No connection became available within the checkout timeout.
    #[error("failed to get redis connection: {message}")]
    Checkout { message: String },
}

/// Configuration for the Redis connection pool.
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl RedisPoolConfig {
    /// Defaults: eight connections, 500 ms checkout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_size: 8,
            connection_timeout: Duration::from_millis(500),
        }
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }
}

/// Lazily connecting Redis pool.
#[derive(Clone)]
pub struct RedisPool {
    inner: Pool<RedisConnectionManager>,
}

impl RedisPool {
    /// Build the pool without contacting the server.
    ///
    /// # Errors
    ///
    /// Returns [`RedisPoolError::InvalidUrl`] when the URL is malformed.
    pub fn new(config: &RedisPoolConfig) -> Result<Self, RedisPoolError> {
        let manager = RedisConnectionManager::new(config.url.as_str()).map_err(|err| {
            RedisPoolError::InvalidUrl {
                message: err.to_string(),
            }
        })?;
        let inner = Pool::builder()
            .max_size(config.max_size)
            .min_idle(Some(0))
            .connection_timeout(config.connection_timeout)
            .build_unchecked(manager);
        Ok(Self { inner })
    }

    /// Check out a connection.
    pub async fn get(&self) -> Result<PooledConnection<'_, RedisConnectionManager>, RedisPoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| RedisPoolError::Checkout {
                message: err.to_string(),
            })
    }
}
