//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing how
//! attempts are throttled or where hashes are stored.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    ///
    /// Fails with `unauthorized` on a bad username or password and with
    /// `too_many_requests` while the username is locked out.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
