//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain constructors report *what* is wrong; this module attaches the
//! request field and a stable machine-readable code so clients can highlight
//! the offending input.

use actix_web::{HttpRequest, error::JsonPayloadError, error::PathError, web};
use serde_json::json;

use crate::domain::{
    ChangeValidationError, CredentialValidationError, Error, UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    EmptyUsername,
    UsernameTooLong,
    InvalidUsername,
    EmptyEmail,
    EmailTooLong,
    InvalidEmail,
    EmptyRole,
    RoleTooLong,
    EmptyPassword,
    NoChanges,
    MalformedBody,
    InvalidPath,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::EmptyUsername => "empty_username",
            ErrorCode::UsernameTooLong => "username_too_long",
            ErrorCode::InvalidUsername => "invalid_username",
            ErrorCode::EmptyEmail => "empty_email",
            ErrorCode::EmailTooLong => "email_too_long",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::EmptyRole => "empty_role",
            ErrorCode::RoleTooLong => "role_too_long",
            ErrorCode::EmptyPassword => "empty_password",
            ErrorCode::NoChanges => "no_changes",
            ErrorCode::MalformedBody => "malformed_body",
            ErrorCode::InvalidPath => "invalid_path",
        }
    }
}

impl From<&UserValidationError> for ErrorCode {
    fn from(value: &UserValidationError) -> Self {
        match value {
            UserValidationError::EmptyUsername => ErrorCode::EmptyUsername,
            UserValidationError::UsernameTooLong { .. } => ErrorCode::UsernameTooLong,
            UserValidationError::UsernameInvalidCharacters => ErrorCode::InvalidUsername,
            UserValidationError::EmptyEmail => ErrorCode::EmptyEmail,
            UserValidationError::EmailTooLong { .. } => ErrorCode::EmailTooLong,
            UserValidationError::InvalidEmail => ErrorCode::InvalidEmail,
            UserValidationError::EmptyRole => ErrorCode::EmptyRole,
            UserValidationError::RoleTooLong { .. } => ErrorCode::RoleTooLong,
        }
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: Option<&'static str>,
    message: String,
}

impl ValidationError {
    fn new(field: Option<&'static str>, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        let details = match self.field {
            Some(field) => json!({ "field": field, "code": code.as_str() }),
            None => json!({ "code": code.as_str() }),
        };
        Error::invalid_request(self.message).with_details(details)
    }
}

/// Map a registration or update validation failure to `invalid_request`.
pub(crate) fn change_validation_error(err: ChangeValidationError) -> Error {
    let code = match &err {
        ChangeValidationError::Field { source, .. } => ErrorCode::from(source),
        ChangeValidationError::EmptyPassword => ErrorCode::EmptyPassword,
        ChangeValidationError::NoChanges => ErrorCode::NoChanges,
    };
    ValidationError::new(err.field(), err.to_string()).with_code(code)
}

/// Map a login input failure to `invalid_request`.
pub(crate) fn credential_validation_error(err: CredentialValidationError) -> Error {
    let (field, code) = match &err {
        CredentialValidationError::EmptyUsername => ("username", ErrorCode::EmptyUsername),
        CredentialValidationError::EmptyPassword => ("password", ErrorCode::EmptyPassword),
    };
    ValidationError::new(Some(field), err.to_string()).with_code(code)
}

/// JSON extractor configuration reporting malformed bodies as domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        ValidationError::new(None, format!("invalid request body: {err}"))
            .with_code(ErrorCode::MalformedBody)
            .into()
    })
}

/// Path extractor configuration reporting non-numeric ids as domain errors.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        ValidationError::new(Some("id"), format!("invalid path parameter: {err}"))
            .with_code(ErrorCode::InvalidPath)
            .into()
    })
}
