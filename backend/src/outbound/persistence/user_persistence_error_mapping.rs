//! Mapping from pool and Diesel failures to [`UserPersistenceError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::UserPersistenceError;

use super::pool::PoolError;

/// Map pool errors to repository connection errors.
pub(super) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors, distinguishing uniqueness violations.
pub(super) fn map_diesel_error(error: DieselError) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            UserPersistenceError::unique_violation(
                info.constraint_name().unwrap_or("users").to_owned(),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            UserPersistenceError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => UserPersistenceError::query(info.message().to_owned()),
        DieselError::QueryBuilderError(err) => UserPersistenceError::query(err.to_string()),
        other => UserPersistenceError::query(other.to_string()),
    }
}
