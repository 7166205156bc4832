//! Driving port for user write use-cases.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User, UserChanges, UserId};

/// Domain use-case port for mutating users.
///
/// Every successful mutation invalidates the cached user list; failed
/// mutations leave it untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create an account; `conflict` when the username or email is taken.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Apply a partial update; `not_found` when the id is unknown.
    async fn update(&self, id: UserId, changes: UserChanges) -> Result<User, Error>;

    /// Remove an account; `not_found` when the id is unknown.
    async fn delete(&self, id: UserId) -> Result<(), Error>;
}
