//! Cache-tier adapters implementing [`CacheStore`].
//!
//! - [`RedisCacheStore`]: `bb8-redis` pool, one checkout per command.
//! - [`DisabledCacheStore`]: stands in when no Redis URL is configured.
//!
//! [`CacheStore`]: crate::domain::ports::CacheStore

mod disabled;
mod redis_cache_store;
mod redis_pool;

pub use disabled::DisabledCacheStore;
pub use redis_cache_store::RedisCacheStore;
pub use redis_pool::{RedisPool, RedisPoolConfig, RedisPoolError};
