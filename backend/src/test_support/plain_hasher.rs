//! Fast, reversible-looking password hasher for tests.
//!
//! bcrypt at production cost would dominate test run time; this stand-in
//! keeps the port's contract while counting verifications.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash};

const PREFIX: &str = "plain$";

/// Hashes to `plain$<password>`.
#[derive(Debug, Default)]
pub struct PlainPasswordHasher {
    verifications: AtomicUsize,
}

impl PlainPasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of verifications performed, decoys included.
    pub fn verifications(&self) -> usize {
        self.verifications.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        Ok(PasswordHash::new(format!("{PREFIX}{}", password.expose())))
    }

    async fn verify(
        &self,
        password: &Password,
        stored: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        let Some(expected) = stored.as_str().strip_prefix(PREFIX) else {
            return Err(PasswordHashError::malformed_hash("missing plain$ prefix"));
        };
        Ok(expected == password.expose())
    }

    async fn verify_decoy(&self, _password: &Password) -> Result<(), PasswordHashError> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
