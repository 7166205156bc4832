//! Keys addressing the two derived values the directory keeps in the cache.
use thiserror::Error;

use crate::domain::LoginName;

/// Key of the cached user list snapshot.
pub const USERS_LIST_KEY: &str = "users_list";
/// Prefix of the per-username failed-login counters.
pub const LOGIN_ATTEMPTS_PREFIX: &str = "login_attempts:";

/// Validated cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Construct a cache key after validating that it is non-empty and trimmed.
    ///
    /// # Examples
    /// ```
    /// use directory::domain::ports::CacheKey;
    ///
    /// let key = CacheKey::new("users_list").expect("valid key");
    /// assert_eq!(key.as_str(), "users_list");
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, CacheKeyValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(CacheKeyValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(CacheKeyValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Key holding the encoded user list snapshot.
    pub fn users_list() -> Self {
        Self(USERS_LIST_KEY.to_owned())
    }

    /// Key holding the failed-login counter for `username`.
    ///
    /// The name is appended verbatim; the prefix keeps the key non-empty and
    /// free of leading whitespace.
    pub fn login_attempts(username: &LoginName) -> Self {
        Self(format!("{LOGIN_ATTEMPTS_PREFIX}{username}"))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors returned when constructing [`CacheKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheKeyValidationError {
    /// Key is empty after trimming whitespace.
    #[error("cache key must not be empty")]
    Empty,
    /// Key contains leading or trailing whitespace.
    #[error("cache key must not contain surrounding whitespace")]
    ContainsWhitespace,
}
