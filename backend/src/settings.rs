//! Service configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `DIRECTORY_*` environment variables, or a
//! configuration file. Only the database URL is mandatory; everything else
//! falls back to the defaults below, so an empty environment still loads and
//! the missing URL is reported by [`DirectorySettings::database_url`].

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{
    DEFAULT_LOCKOUT_WINDOW, DEFAULT_MAX_FAILURES, DEFAULT_USER_LIST_TTL, ThrottlePolicy,
};
use crate::middleware::CorsPolicy;
use crate::outbound::persistence::PoolConfig;
use crate::outbound::security::DEFAULT_BCRYPT_COST;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_DB_POOL_SIZE: u32 = 10;
const DEFAULT_DB_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_CACHE_POOL_SIZE: u32 = 8;
const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_millis(500);

/// Configuration values for the directory service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DIRECTORY")]
pub struct DirectorySettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Redis connection URL; the cache is disabled when absent.
    pub redis_url: Option<String>,
    /// Address to bind the HTTP listener to.
    pub host: Option<IpAddr>,
    /// Port to bind the HTTP listener to.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Maximum number of pooled database connections.
    pub db_pool_size: Option<u32>,
    /// Database connection checkout timeout in milliseconds.
    pub db_timeout_ms: Option<u64>,
    /// Maximum number of pooled cache connections.
    pub cache_pool_size: Option<u32>,
    /// Cache checkout and command timeout in milliseconds.
    pub cache_timeout_ms: Option<u64>,
    /// Freshness window of the cached user list in seconds.
    pub user_list_ttl_secs: Option<u64>,
    /// Consecutive failures that lock a username out.
    pub login_max_failures: Option<u64>,
    /// Lockout window in seconds.
    pub login_window_secs: Option<u64>,
    /// bcrypt work factor for new hashes.
    pub bcrypt_cost: Option<u32>,
    /// Comma-separated browser origins; blank or `*` admits any origin.
    pub cors_allowed_origins: Option<String>,
}

impl DirectorySettings {
    /// Return the database URL or an error naming the missing setting.
    pub fn database_url(&self) -> Result<&str, std::io::Error> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| {
                std::io::Error::other("DIRECTORY_DATABASE_URL (or --database-url) must be set")
            })
    }

    /// Return the configured Redis URL, treating blank values as unset.
    pub fn redis_url(&self) -> Option<&str> {
        self.redis_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Socket address for the HTTP listener.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(DEFAULT_HOST),
            self.port,
        )
    }

    /// Database pool configuration.
    pub fn db_pool_config(&self) -> Result<PoolConfig, std::io::Error> {
        Ok(PoolConfig::new(self.database_url()?)
            .with_max_size(self.db_pool_size.unwrap_or(DEFAULT_DB_POOL_SIZE))
            .with_connection_timeout(
                self.db_timeout_ms
                    .map(Duration::from_millis)
                    .unwrap_or(DEFAULT_DB_TIMEOUT),
            ))
    }

    /// Maximum number of pooled cache connections.
    pub fn cache_pool_size(&self) -> u32 {
        self.cache_pool_size.unwrap_or(DEFAULT_CACHE_POOL_SIZE)
    }

    /// Deadline applied to cache checkout and to each cache command.
    pub fn cache_timeout(&self) -> Duration {
        self.cache_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_CACHE_TIMEOUT)
    }

    /// Freshness window of the cached user list.
    pub fn user_list_ttl(&self) -> Duration {
        self.user_list_ttl_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_USER_LIST_TTL)
    }

    /// Login throttle policy.
    pub fn throttle_policy(&self) -> ThrottlePolicy {
        ThrottlePolicy::new(
            self.login_max_failures.unwrap_or(DEFAULT_MAX_FAILURES),
            self.login_window_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_LOCKOUT_WINDOW),
        )
    }

    /// bcrypt work factor.
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST)
    }

    /// Cross-origin policy; any origin unless origins are listed.
    pub fn cors_policy(&self) -> CorsPolicy {
        self.cors_allowed_origins
            .as_deref()
            .map_or_else(CorsPolicy::any_origin, CorsPolicy::from_list)
    }
}
