//! Translation of driven-port failures into domain [`Error`]s.

use tracing::error;

use super::Error;
use super::ports::{PasswordHashError, UserPersistenceError};

/// Message returned when a uniqueness constraint rejects a write.
pub const DUPLICATE_USER_MESSAGE: &str = "Username or email already exists";
/// Message returned for unknown user identifiers.
pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

/// Map a repository failure; store outages keep their detail.
pub(crate) fn map_persistence_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::UniqueViolation { .. } => Error::conflict(DUPLICATE_USER_MESSAGE),
        UserPersistenceError::Connection { message } => {
            error!(%message, "user store unavailable");
            Error::dependency_failure(format!("user store unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user store query failed");
            Error::dependency_failure(format!("user store query failed: {message}"))
        }
    }
}

/// Map a hashing failure; the detail stays in the logs.
pub(crate) fn map_hash_error(err: PasswordHashError) -> Error {
    error!(error = %err, "password hashing failed");
    Error::internal(format!("password hashing failed: {err}"))
}
