//! Cache-aside read path for users.
//!
//! The user list is served from the cached snapshot when one is live,
//! otherwise from the durable store, which then repopulates the snapshot.
//! An unreachable cache sends every read to the store without attempting
//! to repopulate.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::ports::{ListSource, UserListing, UserRepository, UsersQuery};
use super::user_errors::{USER_NOT_FOUND_MESSAGE, map_persistence_error};
use super::{Error, SnapshotRead, User, UserId, UserListCache};

/// Read-side service implementing [`UsersQuery`].
#[derive(Clone)]
pub struct UserQueryService<R> {
    users: Arc<R>,
    list_cache: UserListCache,
}

impl<R> UserQueryService<R> {
    /// Create a service over the durable store and the list snapshot cache.
    pub fn new(users: Arc<R>, list_cache: UserListCache) -> Self {
        Self { users, list_cache }
    }
}

impl<R> UserQueryService<R>
where
    R: UserRepository,
{
    async fn load_from_store(&self) -> Result<Vec<User>, Error> {
        self.users.list_users().await.map_err(map_persistence_error)
    }
}

#[async_trait]
impl<R> UsersQuery for UserQueryService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<UserListing, Error> {
        let users = match self.list_cache.read().await {
            SnapshotRead::Fresh(users) => {
                debug!(count = users.len(), "user list served from cache");
                return Ok(UserListing {
                    users,
                    source: ListSource::Cache,
                });
            }
            SnapshotRead::Missing => {
                let users = self.load_from_store().await?;
                self.list_cache.store(&users).await;
                users
            }
            SnapshotRead::Unavailable => self.load_from_store().await?,
        };
        Ok(UserListing {
            users,
            source: ListSource::Database,
        })
    }

    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND_MESSAGE))
    }
}
