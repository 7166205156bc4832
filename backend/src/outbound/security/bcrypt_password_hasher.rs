//! bcrypt implementation of [`PasswordHasher`].
//!
//! Hashing and verification are CPU bound and run on Tokio's blocking pool.

use async_trait::async_trait;
use tokio::task;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash};

/// Work factor used when none is configured.
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

/// bcrypt-backed credential hasher.
#[derive(Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
    decoy: PasswordHash,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the given work factor.
    ///
    /// Computes the decoy hash once, so this blocks for one hash duration.
    ///
    /// # Errors
    ///
    /// Returns [`PasswordHashError::Hashing`] when `cost` is outside bcrypt's
    /// accepted range.
    pub fn new(cost: u32) -> Result<Self, PasswordHashError> {
        let decoy = bcrypt::hash("directory-decoy-credential", cost)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(Self {
            cost,
            decoy: PasswordHash::new(decoy),
        })
    }

    /// Configured work factor.
    pub fn cost(&self) -> u32 {
        self.cost
    }

    async fn check(
        password: &Password,
        stored: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = password.clone();
        let stored = stored.clone();
        task::spawn_blocking(move || bcrypt::verify(password.expose(), stored.as_str()))
            .await
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?
            .map_err(|err| PasswordHashError::malformed_hash(err.to_string()))
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let password = password.clone();
        let cost = self.cost;
        let encoded = task::spawn_blocking(move || bcrypt::hash(password.expose(), cost))
            .await
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?
            .map_err(|err| PasswordHashError::hashing(err.to_string()))?;
        Ok(PasswordHash::new(encoded))
    }

    async fn verify(
        &self,
        password: &Password,
        stored: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        Self::check(password, stored).await
    }

    async fn verify_decoy(&self, password: &Password) -> Result<(), PasswordHashError> {
        Self::check(password, &self.decoy).await.map(|_| ())
    }
}
