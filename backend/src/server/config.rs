//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use directory::CorsPolicy;
use directory::domain::ports::CacheStore;
use directory::domain::{DEFAULT_USER_LIST_TTL, ThrottlePolicy};
use directory::outbound::cache::DisabledCacheStore;
use directory::outbound::persistence::DbPool;
use directory::outbound::security::BcryptPasswordHasher;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) hasher: BcryptPasswordHasher,
    pub(crate) cache: Arc<dyn CacheStore>,
    pub(crate) user_list_ttl: Duration,
    pub(crate) throttle: ThrottlePolicy,
    pub(crate) cors: CorsPolicy,
}

impl ServerConfig {
    /// Construct a server configuration with the cache disabled.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, hasher: BcryptPasswordHasher) -> Self {
        Self {
            bind_addr,
            db_pool,
            hasher,
            cache: Arc::new(DisabledCacheStore),
            user_list_ttl: DEFAULT_USER_LIST_TTL,
            throttle: ThrottlePolicy::default(),
            cors: CorsPolicy::any_origin(),
        }
    }

    /// Attach the cache tier used for the user list and login throttle.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = cache;
        self
    }

    /// Override the user list freshness window.
    #[must_use]
    pub fn with_user_list_ttl(mut self, ttl: Duration) -> Self {
        self.user_list_ttl = ttl;
        self
    }

    /// Override the login throttle policy.
    #[must_use]
    pub fn with_throttle_policy(mut self, policy: ThrottlePolicy) -> Self {
        self.throttle = policy;
        self
    }

    /// Override the cross-origin policy.
    #[must_use]
    pub fn with_cors_policy(mut self, policy: CorsPolicy) -> Self {
        self.cors = policy;
        self
    }
}
