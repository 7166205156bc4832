//! Write path for users with post-commit list invalidation.
//!
//! Each mutation runs its existence and uniqueness checks against the
//! durable store, commits, and only then drops the cached user list. Failed
//! mutations leave the snapshot alone; an unreachable cache makes the drop
//! a no-op and natural expiry bounds the staleness.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{NewUser, PasswordHasher, UserRepository, UsersCommand};
use super::user_errors::{
    DUPLICATE_USER_MESSAGE, USER_NOT_FOUND_MESSAGE, map_hash_error, map_persistence_error,
};
use super::{Error, Registration, User, UserChanges, UserId, UserListCache};

/// Write-side service implementing [`UsersCommand`].
#[derive(Clone)]
pub struct UserCommandService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
    list_cache: UserListCache,
}

impl<R, H> UserCommandService<R, H> {
    /// Create a service over the store, the hasher, and the list snapshot.
    pub fn new(users: Arc<R>, hasher: Arc<H>, list_cache: UserListCache) -> Self {
        Self {
            users,
            hasher,
            list_cache,
        }
    }
}

#[async_trait]
impl<R, H> UsersCommand for UserCommandService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let Registration {
            username,
            email,
            password,
        } = registration;

        if self
            .users
            .username_or_email_taken(&username, &email)
            .await
            .map_err(map_persistence_error)?
        {
            return Err(Error::conflict(DUPLICATE_USER_MESSAGE));
        }

        let password_hash = self.hasher.hash(&password).await.map_err(map_hash_error)?;
        let user = self
            .users
            .create(&NewUser {
                username,
                email,
                password_hash,
            })
            .await
            .map_err(map_persistence_error)?;

        self.list_cache.invalidate().await;
        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<User, Error> {
        if self
            .users
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .is_none()
        {
            return Err(Error::not_found(USER_NOT_FOUND_MESSAGE));
        }

        let password_hash = match changes.password() {
            Some(password) => Some(self.hasher.hash(password).await.map_err(map_hash_error)?),
            None => None,
        };
        let changeset = changes.into_changeset(password_hash);
        let user = self
            .users
            .update(id, &changeset)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))?;

        self.list_cache.invalidate().await;
        info!(user_id = %id, "user updated");
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<(), Error> {
        let deleted = self
            .users
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        if !deleted {
            return Err(Error::not_found(USER_NOT_FOUND_MESSAGE));
        }

        self.list_cache.invalidate().await;
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_command_service_tests.rs"]
mod tests;
