//! Cached snapshot of the full user list.
//!
//! The snapshot is a JSON array of public [`User`] views stored under
//! [`CacheKey::users_list`] with a bounded freshness window. It is never
//! authoritative: writers drop it after committing and readers fall back to
//! the durable store whenever it is absent, stale, or undecodable.

use std::time::Duration;

use tracing::{debug, warn};

use super::ports::CacheKey;
use super::{BestEffortCache, CacheRead, User};

/// Default freshness window of the snapshot.
pub const DEFAULT_USER_LIST_TTL: Duration = Duration::from_secs(30);

/// Result of looking up the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotRead {
    /// A live snapshot; may be an empty list.
    Fresh(Vec<User>),
    /// No usable snapshot; the cache is reachable.
    Missing,
    /// The cache tier is down; do not try to repopulate.
    Unavailable,
}

/// Reads, writes, and invalidates the user list snapshot.
#[derive(Clone)]
pub struct UserListCache {
    cache: BestEffortCache,
    ttl: Duration,
}

impl UserListCache {
    /// Create a snapshot cache with the given freshness window.
    pub fn new(cache: BestEffortCache, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    /// Freshness window applied on every write.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up the snapshot, treating undecodable payloads as a miss.
    pub async fn read(&self) -> SnapshotRead {
        match self.cache.get(&CacheKey::users_list()).await {
            CacheRead::Hit(payload) => match serde_json::from_str::<Vec<User>>(&payload) {
                Ok(users) => SnapshotRead::Fresh(users),
                Err(err) => {
                    warn!(error = %err, "discarding undecodable user list snapshot");
                    SnapshotRead::Missing
                }
            },
            CacheRead::Miss => SnapshotRead::Missing,
            CacheRead::Unavailable => SnapshotRead::Unavailable,
        }
    }

    /// Publish `users` as the current snapshot.
    pub async fn store(&self, users: &[User]) {
        let payload = match serde_json::to_string(users) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "failed to encode user list snapshot");
                return;
            }
        };
        if self
            .cache
            .put(&CacheKey::users_list(), &payload, self.ttl)
            .await
        {
            debug!(count = users.len(), ttl_secs = self.ttl.as_secs(), "user list cached");
        }
    }

    /// Drop the snapshot after a committed write.
    pub async fn invalidate(&self) {
        if self.cache.remove(&CacheKey::users_list()).await {
            debug!("user list snapshot invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{CacheError, MockCacheStore};
    use crate::domain::{EmailAddress, Role, UserId, UserRecord, Username};
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    #[fixture]
    fn users() -> Vec<User> {
        let at = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("timestamp");
        vec![User::new(UserRecord {
            id: UserId::new(1),
            username: Username::new("alice").expect("username"),
            email: EmailAddress::new("alice@example.com").expect("email"),
            role: Role::new("user").expect("role"),
            created_at: at,
            updated_at: at,
        })]
    }

    fn snapshot_cache(store: MockCacheStore) -> UserListCache {
        UserListCache::new(
            BestEffortCache::new(Arc::new(store)),
            DEFAULT_USER_LIST_TTL,
        )
    }

    #[rstest]
    #[tokio::test]
    async fn decodes_live_snapshot(users: Vec<User>) {
        let payload = serde_json::to_string(&users).expect("encode");
        let mut store = MockCacheStore::new();
        store
            .expect_get()
            .return_once(move |_| Ok(Some(payload)));

        assert_eq!(snapshot_cache(store).read().await, SnapshotRead::Fresh(users));
    }

    #[rstest]
    #[tokio::test]
    async fn empty_array_is_a_hit_not_a_miss() {
        let mut store = MockCacheStore::new();
        store
            .expect_get()
            .return_once(|_| Ok(Some("[]".to_owned())));

        assert_eq!(
            snapshot_cache(store).read().await,
            SnapshotRead::Fresh(Vec::new())
        );
    }

    #[rstest]
    #[case(Ok(Some("{not json".to_owned())), SnapshotRead::Missing)]
    #[case(Ok(None), SnapshotRead::Missing)]
    #[case(Err(CacheError::unavailable("refused")), SnapshotRead::Unavailable)]
    #[tokio::test]
    async fn unusable_snapshots(
        #[case] result: Result<Option<String>, CacheError>,
        #[case] expected: SnapshotRead,
    ) {
        let mut store = MockCacheStore::new();
        store.expect_get().return_once(move |_| result);

        assert_eq!(snapshot_cache(store).read().await, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn store_writes_under_list_key_with_ttl(users: Vec<User>) {
        let mut store = MockCacheStore::new();
        store
            .expect_set_with_ttl()
            .withf(|key, value, ttl| {
                key.as_str() == "users_list"
                    && value.starts_with('[')
                    && *ttl == Duration::from_secs(30)
            })
            .times(1)
            .return_once(|_, _, _| Ok(()));

        snapshot_cache(store).store(&users).await;
    }

    #[rstest]
    #[tokio::test]
    async fn snapshot_elements_are_public_user_views(users: Vec<User>) {
        let mut store = MockCacheStore::new();
        store
            .expect_set_with_ttl()
            .withf(|_, value, _| {
                let Ok(serde_json::Value::Array(items)) = serde_json::from_str(value) else {
                    return false;
                };
                items.iter().all(|item| {
                    ["id", "username", "email", "role", "createdAt", "updatedAt"]
                        .iter()
                        .all(|field| item.get(field).is_some())
                        && item.get("passwordHash").is_none()
                })
            })
            .times(1)
            .return_once(|_, _, _| Ok(()));

        snapshot_cache(store).store(&users).await;
    }
}
