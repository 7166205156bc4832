//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{
    CacheStatsQuery, CacheStore, LoginService, PasswordHasher, UserRepository, UsersCommand,
    UsersQuery,
};
use crate::domain::{
    BestEffortCache, CacheStatsService, LoginThrottle, ThrottlePolicy, ThrottledLoginService,
    UserCommandService, UserListCache, UserQueryService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users_query: Arc<dyn UsersQuery>,
    pub users_command: Arc<dyn UsersCommand>,
    pub login: Arc<dyn LoginService>,
    pub cache_stats: Arc<dyn CacheStatsQuery>,
}

impl HttpState {
    /// Bundle the driving ports consumed by the HTTP handlers.
    pub fn new(
        users_query: Arc<dyn UsersQuery>,
        users_command: Arc<dyn UsersCommand>,
        login: Arc<dyn LoginService>,
        cache_stats: Arc<dyn CacheStatsQuery>,
    ) -> Self {
        Self {
            users_query,
            users_command,
            login,
            cache_stats,
        }
    }

    /// Compose the domain services over driven-port adapters.
    ///
    /// The list cache and the login throttle share one best-effort view of
    /// `cache`.
    pub fn from_adapters<R, H>(
        users: Arc<R>,
        hasher: Arc<H>,
        cache: Arc<dyn CacheStore>,
        user_list_ttl: Duration,
        throttle: ThrottlePolicy,
    ) -> Self
    where
        R: UserRepository + 'static,
        H: PasswordHasher + 'static,
    {
        let cache = BestEffortCache::new(cache);
        let list_cache = UserListCache::new(cache.clone(), user_list_ttl);

        Self::new(
            Arc::new(UserQueryService::new(users.clone(), list_cache.clone())),
            Arc::new(UserCommandService::new(
                users.clone(),
                hasher.clone(),
                list_cache,
            )),
            Arc::new(ThrottledLoginService::new(
                users,
                hasher,
                LoginThrottle::new(cache.clone(), throttle),
            )),
            Arc::new(CacheStatsService::new(cache)),
        )
    }
}
