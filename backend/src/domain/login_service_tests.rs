//! Tests for throttled authentication.

use std::time::Duration;

use super::*;
use crate::domain::ports::{
    CacheError, MockCacheStore, MockPasswordHasher, MockUserRepository, StoredCredentials,
    UserPersistenceError,
};
use crate::domain::{
    BestEffortCache, EmailAddress, ErrorCode, PasswordHash, Role, UserId, UserRecord, Username,
};
use chrono::Utc;
use rstest::{fixture, rstest};

type Service = ThrottledLoginService<MockUserRepository, MockPasswordHasher>;

#[fixture]
fn alice() -> User {
    let now = Utc::now();
    User::new(UserRecord {
        id: UserId::new(1),
        username: Username::new("alice").expect("username"),
        email: EmailAddress::new("alice@example.com").expect("email"),
        role: Role::new("user").expect("role"),
        created_at: now,
        updated_at: now,
    })
}

fn credentials(password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts("alice", password).expect("credentials")
}

fn service(repo: MockUserRepository, hasher: MockPasswordHasher, cache: MockCacheStore) -> Service {
    let throttle = LoginThrottle::new(
        BestEffortCache::new(Arc::new(cache)),
        ThrottlePolicy::new(5, Duration::from_secs(300)),
    );
    ThrottledLoginService::new(Arc::new(repo), Arc::new(hasher), throttle)
}

fn repo_with(user: User) -> MockUserRepository {
    let mut repo = MockUserRepository::new();
    repo.expect_find_credentials().return_once(move |_| {
        Ok(Some(StoredCredentials {
            user,
            password_hash: PasswordHash::new("hash-of-pw1"),
        }))
    });
    repo
}

fn hasher_accepting(expected: &'static str) -> MockPasswordHasher {
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .returning(move |password, _| Ok(password.expose() == expected));
    hasher
}

fn counter_at(cache: &mut MockCacheStore, count: Option<u64>) {
    cache
        .expect_get()
        .withf(|key| key.as_str() == "login_attempts:alice")
        .return_once(move |_| Ok(count.map(|n| n.to_string())));
}

#[rstest]
#[tokio::test]
async fn locked_username_is_rejected_before_verification() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_credentials().never();
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().never();
    let mut cache = MockCacheStore::new();
    counter_at(&mut cache, Some(5));
    cache.expect_increment_with_ttl().never();

    let err = service(repo, hasher, cache)
        .authenticate(&credentials("pw1"))
        .await
        .expect_err("locked");
    assert_eq!(err.code(), ErrorCode::TooManyRequests);
    assert_eq!(
        err.message(),
        "Too many failed login attempts. Please try again in 5 minutes."
    );
}

#[rstest]
#[tokio::test]
async fn success_clears_counter(alice: User) {
    let mut cache = MockCacheStore::new();
    counter_at(&mut cache, Some(3));
    cache
        .expect_delete()
        .withf(|key| key.as_str() == "login_attempts:alice")
        .times(1)
        .return_once(|_| Ok(()));
    cache.expect_increment_with_ttl().never();

    let user = service(repo_with(alice.clone()), hasher_accepting("pw1"), cache)
        .authenticate(&credentials("pw1"))
        .await
        .expect("authenticated");
    assert_eq!(user, alice);
}

#[rstest]
#[case(4, ErrorCode::Unauthorized)]
#[case(5, ErrorCode::TooManyRequests)]
#[tokio::test]
async fn failure_reaching_threshold_reports_lockout(
    alice: User,
    #[case] count_after_failure: u64,
    #[case] expected: ErrorCode,
) {
    let mut cache = MockCacheStore::new();
    counter_at(&mut cache, Some(count_after_failure - 1));
    cache
        .expect_increment_with_ttl()
        .times(1)
        .return_once(move |_, _| Ok(count_after_failure));
    cache.expect_delete().never();

    let err = service(repo_with(alice), hasher_accepting("pw1"), cache)
        .authenticate(&credentials("wrong"))
        .await
        .expect_err("bad password");
    assert_eq!(err.code(), expected);
}

#[rstest]
#[tokio::test]
async fn unknown_username_spends_a_decoy_verification_and_counts() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_credentials().return_once(|_| Ok(None));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().never();
    hasher.expect_verify_decoy().times(1).return_once(|_| Ok(()));
    let mut cache = MockCacheStore::new();
    counter_at(&mut cache, None);
    cache
        .expect_increment_with_ttl()
        .times(1)
        .return_once(|_, _| Ok(1));

    let err = service(repo, hasher, cache)
        .authenticate(&credentials("pw1"))
        .await
        .expect_err("unknown user");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert_eq!(err.message(), "invalid credentials");
}

#[rstest]
#[tokio::test]
async fn cache_outage_never_locks(alice: User) {
    let mut cache = MockCacheStore::new();
    cache
        .expect_get()
        .return_once(|_| Err(CacheError::unavailable("refused")));
    cache
        .expect_increment_with_ttl()
        .return_once(|_, _| Err(CacheError::unavailable("refused")));

    let err = service(repo_with(alice), hasher_accepting("pw1"), cache)
        .authenticate(&credentials("wrong"))
        .await
        .expect_err("bad password");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[tokio::test]
async fn store_outage_does_not_count_as_a_failure() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_credentials()
        .return_once(|_| Err(UserPersistenceError::connection("refused")));
    let mut cache = MockCacheStore::new();
    counter_at(&mut cache, None);
    cache.expect_increment_with_ttl().never();

    let err = service(repo, MockPasswordHasher::new(), cache)
        .authenticate(&credentials("pw1"))
        .await
        .expect_err("store down");
    assert_eq!(err.code(), ErrorCode::DependencyFailure);
}
