//! Write-side inputs: registrations and partial account updates.
//!
//! Partial updates are modelled as explicit optional fields. A field that is
//! present but blank is a validation failure rather than "leave unchanged";
//! only an absent field means no change.

use std::fmt;

use super::{
    EmailAddress, Password, PasswordHash, Role, UserRecord, UserValidationError, Username,
};

/// Field-level failure while building write inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeValidationError {
    /// A user field failed validation.
    Field {
        field: &'static str,
        source: UserValidationError,
    },
    /// The supplied password was empty.
    EmptyPassword,
    /// An update carried no fields at all.
    NoChanges,
}

impl fmt::Display for ChangeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { source, .. } => source.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::NoChanges => write!(f, "No fields to update"),
        }
    }
}

impl std::error::Error for ChangeValidationError {}

impl ChangeValidationError {
    /// Name of the offending request field, when one applies.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Field { field, .. } => Some(*field),
            Self::EmptyPassword => Some("password"),
            Self::NoChanges => None,
        }
    }
}

fn field_error(field: &'static str) -> impl FnOnce(UserValidationError) -> ChangeValidationError {
    move |source| ChangeValidationError::Field { field, source }
}

fn password(raw: &str) -> Result<Password, ChangeValidationError> {
    Password::new(raw).map_err(|_| ChangeValidationError::EmptyPassword)
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: Username,
    pub email: EmailAddress,
    pub password: Password,
}

impl Registration {
    /// Validate raw registration fields.
    ///
    /// # Examples
    /// ```
    /// use directory::domain::Registration;
    ///
    /// let registration = Registration::try_from_parts("alice", "alice@example.com", "pw1")
    ///     .expect("valid registration");
    /// assert_eq!(registration.username.as_ref(), "alice");
    /// ```
    pub fn try_from_parts(
        username: &str,
        email: &str,
        raw_password: &str,
    ) -> Result<Self, ChangeValidationError> {
        Ok(Self {
            username: Username::new(username).map_err(field_error("username"))?,
            email: EmailAddress::new(email).map_err(field_error("email"))?,
            password: password(raw_password)?,
        })
    }
}

/// Validated partial update; at least one field is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    email: Option<EmailAddress>,
    password: Option<Password>,
    role: Option<Role>,
}

impl UserChanges {
    /// Validate the supplied subset of mutable fields.
    ///
    /// # Examples
    /// ```
    /// use directory::domain::{ChangeValidationError, UserChanges};
    ///
    /// let changes = UserChanges::try_from_parts(None, None, Some("admin")).expect("role only");
    /// assert_eq!(changes.role().map(AsRef::as_ref), Some("admin"));
    ///
    /// let err = UserChanges::try_from_parts(None, None, None).expect_err("nothing to change");
    /// assert_eq!(err, ChangeValidationError::NoChanges);
    /// ```
    pub fn try_from_parts(
        email: Option<&str>,
        raw_password: Option<&str>,
        role: Option<&str>,
    ) -> Result<Self, ChangeValidationError> {
        if email.is_none() && raw_password.is_none() && role.is_none() {
            return Err(ChangeValidationError::NoChanges);
        }
        Ok(Self {
            email: email
                .map(EmailAddress::new)
                .transpose()
                .map_err(field_error("email"))?,
            password: raw_password.map(password).transpose()?,
            role: role.map(Role::new).transpose().map_err(field_error("role"))?,
        })
    }

    /// New email, if changing.
    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }

    /// New plaintext password, if changing.
    pub fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }

    /// New role, if changing.
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    /// Replace the plaintext password with its hash for persistence.
    pub fn into_changeset(self, password_hash: Option<PasswordHash>) -> UserChangeset {
        UserChangeset {
            email: self.email,
            password_hash,
            role: self.role,
        }
    }
}

/// Persistence-ready diff; `None` fields are left untouched by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChangeset {
    pub email: Option<EmailAddress>,
    pub password_hash: Option<PasswordHash>,
    pub role: Option<Role>,
}

impl UserChangeset {
    /// Apply the diff to an in-memory record and its stored hash.
    ///
    /// Timestamps are store-assigned and left to the caller.
    pub fn apply(&self, record: &mut UserRecord, stored_hash: &mut PasswordHash) {
        if let Some(email) = &self.email {
            record.email = email.clone();
        }
        if let Some(hash) = &self.password_hash {
            *stored_hash = hash.clone();
        }
        if let Some(role) = &self.role {
            record.role = role.clone();
        }
    }
}
