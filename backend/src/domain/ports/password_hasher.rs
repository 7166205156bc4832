//! Driven port for one-way credential hashing.
use async_trait::async_trait;

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised while hashing or verifying credentials.
    pub enum PasswordHashError {
        /// The hashing backend failed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted one-way hash of `password`.
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;

    /// Compare `password` against `stored` in constant time.
    async fn verify(
        &self,
        password: &Password,
        stored: &PasswordHash,
    ) -> Result<bool, PasswordHashError>;

    /// Spend one verification's worth of work against a decoy hash.
    ///
    /// Used when the username is unknown so both failure paths cost the same.
    async fn verify_decoy(&self, password: &Password) -> Result<(), PasswordHashError>;
}
