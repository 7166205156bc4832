//! Credential primitives: plaintext passwords, stored hashes, and login input.
//!
//! Plaintext passwords are wrapped in [`Zeroizing`] so they are wiped from
//! memory once dropped, and their `Debug` output is redacted.
//!
//! Login names are lookup keys, not registrations: any non-blank string is
//! accepted so that malformed and unknown names fail authentication the same
//! way and count toward the same throttle.

use std::fmt;

use zeroize::Zeroizing;

/// Domain error returned when credential inputs are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// Username was missing or blank.
    EmptyUsername,
    /// Password was empty.
    EmptyPassword,
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

/// Caller-supplied plaintext password.
///
/// Whitespace is preserved verbatim; only the empty string is rejected.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and wrap a plaintext password.
    pub fn new(raw: &str) -> Result<Self, CredentialValidationError> {
        if raw.is_empty() {
            return Err(CredentialValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Borrow the plaintext for hashing or verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Opaque one-way credential hash as persisted by the store.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`PasswordHasher`](crate::domain::ports::PasswordHasher).
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// The encoded hash string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(***)")
    }
}

/// Name a caller logs in with, kept verbatim.
///
/// Unlike [`Username`](crate::domain::Username) no shape or length rules
/// apply; the store simply finds no match for names it never issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoginName(String);

impl LoginName {
    /// Wrap a login name; only blank input is rejected.
    pub fn new(raw: impl Into<String>) -> Result<Self, CredentialValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CredentialValidationError::EmptyUsername);
        }
        Ok(Self(raw))
    }

    /// The name as supplied.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LoginName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated login credentials.
///
/// # Examples
/// ```
/// use directory::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("alice", "pw1").expect("valid credentials");
/// assert_eq!(creds.username().as_str(), "alice");
/// assert_eq!(creds.password().expose(), "pw1");
///
/// let odd = LoginCredentials::try_from_parts("bob smith", "pw").expect("any non-blank name");
/// assert_eq!(odd.username().as_str(), "bob smith");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: LoginName,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialValidationError> {
        let username = LoginName::new(username)?;
        let password = Password::new(password)?;
        Ok(Self { username, password })
    }

    /// Name used for lookup and throttling.
    pub fn username(&self) -> &LoginName {
        &self.username
    }

    /// Plaintext password to verify.
    pub fn password(&self) -> &Password {
        &self.password
    }
}
