//! Service entry-point: loads configuration, applies migrations, and serves
//! the directory API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use directory::DirectorySettings;
use directory::inbound::http::health::HealthState;
use directory::outbound::persistence::{DbPool, run_pending_migrations};
use directory::outbound::security::BcryptPasswordHasher;
use server::{ServerConfig, build_cache_store, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DirectorySettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load configuration: {e}")))?;

    let database_url = settings.database_url()?.to_owned();
    tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|e| std::io::Error::other(format!("migration task failed: {e}")))?
        .map_err(|e| std::io::Error::other(format!("database migration failed: {e}")))?;

    let db_pool = DbPool::new(settings.db_pool_config()?)
        .await
        .map_err(|e| std::io::Error::other(format!("database pool unavailable: {e}")))?;
    let hasher = BcryptPasswordHasher::new(settings.bcrypt_cost())
        .map_err(|e| std::io::Error::other(format!("password hasher setup failed: {e}")))?;

    let config = ServerConfig::new(settings.bind_addr(), db_pool, hasher)
        .with_cache(build_cache_store(&settings)?)
        .with_user_list_ttl(settings.user_list_ttl())
        .with_throttle_policy(settings.throttle_policy())
        .with_cors_policy(settings.cors_policy());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(addr = %settings.bind_addr(), "directory service listening");
    server.await
}
