//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! - **Thin adapters**: the repository only translates between Diesel rows and
//!   domain types; no business rules live here.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Async pooling**: `bb8` through `diesel-async`, one checkout per call.
//! - **Typed errors**: every failure becomes a [`UserPersistenceError`].
//!
//! [`UserPersistenceError`]: crate::domain::ports::UserPersistenceError
//!
//! # Example
//!
//! ```ignore
//! use directory::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/userdb")).await?;
//! let repo = DieselUserRepository::new(pool);
//! ```

mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;
mod user_persistence_error_mapping;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
