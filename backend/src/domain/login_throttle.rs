//! Per-username failed-login counter and lockout state machine.
//!
//! A username moves from [`ThrottleState::Clear`] through
//! [`ThrottleState::Warning`] to [`ThrottleState::Locked`] as failures
//! accumulate. The counter lives in the cache tier under
//! [`CacheKey::login_attempts`], is bumped atomically with its expiry reset
//! to the full window, and is deleted on a successful login. When the cache
//! is unreachable every username reads as `Clear`.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::ports::CacheKey;
use super::{BestEffortCache, CacheRead, LoginName};

/// Default number of consecutive failures that triggers a lockout.
pub const DEFAULT_MAX_FAILURES: u64 = 5;
/// Default lockout window.
pub const DEFAULT_LOCKOUT_WINDOW: Duration = Duration::from_secs(300);

/// Threshold and window governing lockouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottlePolicy {
    max_failures: u64,
    window: Duration,
}

impl ThrottlePolicy {
    /// Build a policy; a zero threshold is raised to one.
    pub fn new(max_failures: u64, window: Duration) -> Self {
        Self {
            max_failures: max_failures.max(1),
            window,
        }
    }

    /// Failures at which a username locks.
    pub fn max_failures(&self) -> u64 {
        self.max_failures
    }

    /// Counter expiry, refreshed on every failure.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Window rounded up to whole minutes, never below one.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use directory::domain::ThrottlePolicy;
    ///
    /// assert_eq!(ThrottlePolicy::new(5, Duration::from_secs(300)).lockout_minutes(), 5);
    /// assert_eq!(ThrottlePolicy::new(5, Duration::from_secs(90)).lockout_minutes(), 2);
    /// assert_eq!(ThrottlePolicy::new(5, Duration::from_secs(1)).lockout_minutes(), 1);
    /// ```
    pub fn lockout_minutes(&self) -> u64 {
        self.window.as_secs().div_ceil(60).max(1)
    }

    /// Classify a failure count.
    pub fn classify(&self, failures: u64) -> ThrottleState {
        match failures {
            0 => ThrottleState::Clear,
            n if n < self.max_failures => ThrottleState::Warning { failures: n },
            _ => ThrottleState::Locked,
        }
    }
}

impl Default for ThrottlePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FAILURES, DEFAULT_LOCKOUT_WINDOW)
    }
}

/// Lockout state of a single username.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleState {
    /// No failures since the last reset or expiry.
    Clear,
    /// Some failures, still below the threshold.
    Warning { failures: u64 },
    /// Threshold reached; attempts are rejected until the counter expires.
    Locked,
}

impl ThrottleState {
    /// Whether attempts must be rejected without verification.
    pub fn is_locked(self) -> bool {
        matches!(self, Self::Locked)
    }
}

/// Cache-backed login throttle.
#[derive(Clone)]
pub struct LoginThrottle {
    cache: BestEffortCache,
    policy: ThrottlePolicy,
}

impl LoginThrottle {
    /// Create a throttle over the shared cache.
    pub fn new(cache: BestEffortCache, policy: ThrottlePolicy) -> Self {
        Self { cache, policy }
    }

    /// Active policy.
    pub fn policy(&self) -> ThrottlePolicy {
        self.policy
    }

    /// Read-only state check; never touches the counter or its expiry.
    pub async fn state(&self, username: &LoginName) -> ThrottleState {
        match self.cache.get(&CacheKey::login_attempts(username)).await {
            CacheRead::Hit(raw) => match raw.trim().parse::<u64>() {
                Ok(failures) => self.policy.classify(failures),
                Err(err) => {
                    warn!(%username, error = %err, "ignoring unparsable login attempt counter");
                    ThrottleState::Clear
                }
            },
            CacheRead::Miss | CacheRead::Unavailable => ThrottleState::Clear,
        }
    }

    /// Count one failure and return the resulting state.
    pub async fn record_failure(&self, username: &LoginName) -> ThrottleState {
        let key = CacheKey::login_attempts(username);
        let Some(failures) = self.cache.increment(&key, self.policy.window).await else {
            return ThrottleState::Clear;
        };
        let state = self.policy.classify(failures);
        if state.is_locked() {
            info!(%username, failures, "login locked after repeated failures");
        } else {
            debug!(%username, failures, "login failure recorded");
        }
        state
    }

    /// Clear the counter after a successful login.
    pub async fn reset(&self, username: &LoginName) {
        self.cache.remove(&CacheKey::login_attempts(username)).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{CacheError, MockCacheStore};
    use rstest::{fixture, rstest};

    #[fixture]
    fn alice() -> LoginName {
        LoginName::new("alice").expect("login name")
    }

    fn throttle(store: MockCacheStore) -> LoginThrottle {
        LoginThrottle::new(
            BestEffortCache::new(Arc::new(store)),
            ThrottlePolicy::default(),
        )
    }

    #[rstest]
    #[case(0, ThrottleState::Clear)]
    #[case(1, ThrottleState::Warning { failures: 1 })]
    #[case(4, ThrottleState::Warning { failures: 4 })]
    #[case(5, ThrottleState::Locked)]
    #[case(9, ThrottleState::Locked)]
    fn default_policy_classifies_counts(#[case] failures: u64, #[case] expected: ThrottleState) {
        assert_eq!(ThrottlePolicy::default().classify(failures), expected);
    }

    #[rstest]
    fn zero_threshold_is_raised_to_one() {
        let policy = ThrottlePolicy::new(0, DEFAULT_LOCKOUT_WINDOW);
        assert_eq!(policy.max_failures(), 1);
        assert_eq!(policy.classify(1), ThrottleState::Locked);
    }

    #[rstest]
    #[case(Ok(Some("5".to_owned())), ThrottleState::Locked)]
    #[case(Ok(Some("2".to_owned())), ThrottleState::Warning { failures: 2 })]
    #[case(Ok(Some("garbage".to_owned())), ThrottleState::Clear)]
    #[case(Ok(None), ThrottleState::Clear)]
    #[case(Err(CacheError::unavailable("refused")), ThrottleState::Clear)]
    #[tokio::test]
    async fn state_reads_counter_without_mutating(
        alice: LoginName,
        #[case] stored: Result<Option<String>, CacheError>,
        #[case] expected: ThrottleState,
    ) {
        let mut store = MockCacheStore::new();
        store
            .expect_get()
            .withf(|key| key.as_str() == "login_attempts:alice")
            .times(1)
            .return_once(move |_| stored);
        store.expect_increment_with_ttl().never();
        store.expect_set_with_ttl().never();

        assert_eq!(throttle(store).state(&alice).await, expected);
    }

    #[rstest]
    #[case(Ok(1), ThrottleState::Warning { failures: 1 })]
    #[case(Ok(5), ThrottleState::Locked)]
    #[case(Err(CacheError::unavailable("refused")), ThrottleState::Clear)]
    #[tokio::test]
    async fn record_failure_refreshes_full_window(
        alice: LoginName,
        #[case] count: Result<u64, CacheError>,
        #[case] expected: ThrottleState,
    ) {
        let mut store = MockCacheStore::new();
        store
            .expect_increment_with_ttl()
            .withf(|key, ttl| {
                key.as_str() == "login_attempts:alice" && *ttl == DEFAULT_LOCKOUT_WINDOW
            })
            .times(1)
            .return_once(move |_, _| count);

        assert_eq!(throttle(store).record_failure(&alice).await, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn reset_deletes_counter(alice: LoginName) {
        let mut store = MockCacheStore::new();
        store
            .expect_delete()
            .withf(|key| key.as_str() == "login_attempts:alice")
            .times(1)
            .return_once(|_| Ok(()));

        throttle(store).reset(&alice).await;
    }
}
