//! Throttled credential verification.
//!
//! Unknown usernames and wrong passwords are indistinguishable from outside:
//! both cost one hash verification, both count toward the username's
//! lockout, and both return the same `unauthorized` error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{LoginService, PasswordHasher, UserRepository};
use super::user_errors::{map_hash_error, map_persistence_error};
use super::{Error, LoginCredentials, LoginThrottle, ThrottlePolicy, User};

/// Message returned for any rejected credential.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid credentials";

/// Lockout error carrying the wait in whole minutes.
pub fn locked_out_error(policy: ThrottlePolicy) -> Error {
    Error::too_many_requests(format!(
        "Too many failed login attempts. Please try again in {} minutes.",
        policy.lockout_minutes()
    ))
}

/// [`LoginService`] gated by a [`LoginThrottle`].
#[derive(Clone)]
pub struct ThrottledLoginService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
    throttle: LoginThrottle,
}

impl<R, H> ThrottledLoginService<R, H> {
    /// Create a login service over the store, hasher, and throttle.
    pub fn new(users: Arc<R>, hasher: Arc<H>, throttle: LoginThrottle) -> Self {
        Self {
            users,
            hasher,
            throttle,
        }
    }
}

impl<R, H> ThrottledLoginService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn verify(&self, credentials: &LoginCredentials) -> Result<Option<User>, Error> {
        let stored = self
            .users
            .find_credentials(credentials.username())
            .await
            .map_err(map_persistence_error)?;
        match stored {
            Some(stored) => {
                let matches = self
                    .hasher
                    .verify(credentials.password(), &stored.password_hash)
                    .await
                    .map_err(map_hash_error)?;
                Ok(matches.then_some(stored.user))
            }
            None => {
                self.hasher
                    .verify_decoy(credentials.password())
                    .await
                    .map_err(map_hash_error)?;
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl<R, H> LoginService for ThrottledLoginService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let username = credentials.username();
        let policy = self.throttle.policy();

        if self.throttle.state(username).await.is_locked() {
            info!(%username, "login rejected while locked");
            return Err(locked_out_error(policy));
        }

        match self.verify(credentials).await? {
            Some(user) => {
                self.throttle.reset(username).await;
                info!(user_id = %user.id(), %username, "login succeeded");
                Ok(user)
            }
            None => {
                if self.throttle.record_failure(username).await.is_locked() {
                    Err(locked_out_error(policy))
                } else {
                    Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE))
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "login_service_tests.rs"]
mod tests;
