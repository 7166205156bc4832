//! Driven port for the durable user store.
use async_trait::async_trait;

use crate::domain::{
    EmailAddress, LoginName, PasswordHash, User, UserChangeset, UserId, Username,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A username or email uniqueness constraint rejected the write.
        UniqueViolation { message: String } => "user repository uniqueness violated: {message}",
    }
}

/// Row to insert on registration; the store assigns id, role and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
}

/// Public user view paired with the credential hash, for login only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user: User,
    pub password_hash: PasswordHash,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by identifier ascending.
    async fn list_users(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch the public view and credential hash for an exact login name.
    async fn find_credentials(
        &self,
        username: &LoginName,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Whether any user already holds `username` or `email`.
    async fn username_or_email_taken(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<bool, UserPersistenceError>;

    /// Insert a new user, returning the stored view.
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Apply `changes` and refresh `updated_at`; `None` when no row matched.
    async fn update(
        &self,
        id: UserId,
        changes: &UserChangeset,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Delete the user; `false` when no row matched.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
