//! User aggregate and its validated field types.
//!
//! [`User`] is the public view of a directory account: everything the store
//! holds except the credential hash, which never leaves the persistence
//! boundary.
//!
//! Field rules apply to caller input only. Values read back from the store
//! or from a cached snapshot are taken as stored.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Validation errors returned by the user field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyUsername,
    UsernameTooLong { max: usize },
    UsernameInvalidCharacters,
    EmptyEmail,
    EmailTooLong { max: usize },
    InvalidEmail,
    EmptyRole,
    RoleTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::UsernameInvalidCharacters => write!(
                f,
                "username may only contain letters, numbers, dots, dashes, or underscores",
            ),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyRole => write!(f, "role must not be empty"),
            Self::RoleTooLong { max } => write!(f, "role must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Store-assigned numeric user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw identifier issued by the durable store.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for UserId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 50;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 255;
/// Maximum allowed length for a role label.
pub const ROLE_MAX: usize = 50;

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_.-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Shape check only; deliverability is out of scope.
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Unique login name, immutable once the account exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`]; surrounding whitespace is trimmed.
    ///
    /// # Examples
    /// ```
    /// use directory::domain::Username;
    ///
    /// let name = Username::new("  alice ").expect("valid username");
    /// assert_eq!(name.as_ref(), "alice");
    /// assert!(Username::new("al ice").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if !username_regex().is_match(trimmed) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

/// Unique contact address for the account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

/// Free-text authorisation label; the store assigns `user` on registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Role(String);

/// Role the store assigns to newly registered users.
pub const DEFAULT_ROLE: &str = "user";

impl Role {
    /// Validate and construct a [`Role`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyRole);
        }
        if trimmed.chars().count() > ROLE_MAX {
            return Err(UserValidationError::RoleTooLong { max: ROLE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

macro_rules! string_newtype_conversions {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_ref())
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl TryFrom<String> for $ty {
                type Error = UserValidationError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }

            impl $ty {
                /// Wrap a value the store already holds, without re-checking it.
                pub(crate) fn from_stored(value: impl Into<String>) -> Self {
                    Self(value.into())
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    String::deserialize(deserializer).map(Self::from_stored)
                }
            }
        )+
    };
}

string_newtype_conversions!(Username, EmailAddress, Role);

/// Public view of a directory account.
///
/// ## Invariants
/// - `username` and `email` are unique across live users (enforced by the
///   store).
/// - The credential hash is deliberately absent from this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(value_type = i32, example = 1)]
    id: UserId,
    #[schema(value_type = String, example = "alice")]
    username: Username,
    #[schema(value_type = String, example = "alice@example.com")]
    email: EmailAddress,
    #[schema(value_type = String, example = "user")]
    role: Role,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Components of a [`User`] as read back from the store.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user from validated store columns.
    pub fn new(record: UserRecord) -> Self {
        let UserRecord {
            id,
            username,
            email,
            role,
            created_at,
            updated_at,
        } = record;
        Self {
            id,
            username,
            email,
            role,
            created_at,
            updated_at,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Contact address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Authorisation label.
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Creation timestamp assigned by the store.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last mutation timestamp assigned by the store.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests;
