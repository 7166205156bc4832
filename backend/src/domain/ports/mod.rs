//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports ([`UserRepository`], [`CacheStore`], [`PasswordHasher`]) are
//! implemented by outbound adapters. Driving ports ([`UsersQuery`],
//! [`UsersCommand`], [`LoginService`], [`CacheStatsQuery`]) are implemented by
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod cache_key;
mod cache_stats_query;
mod cache_store;
mod login_service;
mod password_hasher;
mod user_repository;
mod users_command;
mod users_query;

pub use cache_key::{CacheKey, CacheKeyValidationError, LOGIN_ATTEMPTS_PREFIX, USERS_LIST_KEY};
#[cfg(test)]
pub use cache_stats_query::MockCacheStatsQuery;
pub use cache_stats_query::{CacheStatsQuery, CacheStatus};
#[cfg(test)]
pub use cache_store::MockCacheStore;
pub use cache_store::{CacheError, CacheServerStats, CacheStore};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUser, StoredCredentials, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{ListSource, UserListing, UsersQuery};
