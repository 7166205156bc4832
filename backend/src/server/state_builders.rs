//! Builders wiring adapters into the HTTP state ports.

use std::sync::Arc;

use tracing::{info, warn};

use directory::DirectorySettings;
use directory::domain::ports::CacheStore;
use directory::inbound::http::state::HttpState;
use directory::outbound::cache::{DisabledCacheStore, RedisCacheStore, RedisPool, RedisPoolConfig};
use directory::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Select the cache adapter from settings.
///
/// No Redis URL means the cache is disabled. A malformed URL is a startup
/// error; an unreachable server is not, since the pool connects lazily.
pub(crate) fn build_cache_store(
    settings: &DirectorySettings,
) -> std::io::Result<Arc<dyn CacheStore>> {
    let Some(url) = settings.redis_url() else {
        warn!("no redis url configured; running with the cache disabled");
        return Ok(Arc::new(DisabledCacheStore));
    };
    let timeout = settings.cache_timeout();
    let pool_config = RedisPoolConfig::new(url)
        .with_max_size(settings.cache_pool_size())
        .with_connection_timeout(timeout);
    let pool = RedisPool::new(&pool_config)
        .map_err(|err| std::io::Error::other(format!("invalid redis configuration: {err}")))?;
    info!("redis cache configured");
    Ok(Arc::new(RedisCacheStore::new(pool, timeout)))
}

/// Build the HTTP state from the server configuration.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(config.db_pool.clone()));
    HttpState::from_adapters(
        users,
        Arc::new(config.hasher.clone()),
        config.cache.clone(),
        config.user_list_ttl,
        config.throttle,
    )
}
