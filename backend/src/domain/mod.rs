//! Domain primitives, ports, and services of the user directory.
//!
//! Purpose: hold the directory's business rules (cache-aside listing,
//! write invalidation, and login throttling) independently of HTTP, Diesel,
//! or Redis. Adapters plug in through [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User and its field types: public account view.
//! - Registration / UserChanges: validated write inputs.
//! - UserQueryService, UserCommandService, ThrottledLoginService,
//!   CacheStatsService: driving port implementations.

pub mod best_effort_cache;
pub mod cache_stats_service;
pub mod credentials;
pub mod error;
pub mod login_service;
pub mod login_throttle;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_changes;
pub mod user_command_service;
mod user_errors;
pub mod user_list_cache;
pub mod user_query_service;

pub use self::best_effort_cache::{BestEffortCache, CacheRead};
pub use self::cache_stats_service::CacheStatsService;
pub use self::credentials::{
    CredentialValidationError, LoginCredentials, LoginName, Password, PasswordHash,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::login_service::{INVALID_CREDENTIALS_MESSAGE, ThrottledLoginService, locked_out_error};
pub use self::login_throttle::{
    DEFAULT_LOCKOUT_WINDOW, DEFAULT_MAX_FAILURES, LoginThrottle, ThrottlePolicy, ThrottleState,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    DEFAULT_ROLE, EMAIL_MAX, EmailAddress, ROLE_MAX, Role, USERNAME_MAX, User, UserId, UserRecord,
    UserValidationError, Username,
};
pub use self::user_changes::{ChangeValidationError, Registration, UserChangeset, UserChanges};
pub use self::user_command_service::UserCommandService;
pub use self::user_errors::{DUPLICATE_USER_MESSAGE, USER_NOT_FOUND_MESSAGE};
pub use self::user_list_cache::{DEFAULT_USER_LIST_TTL, SnapshotRead, UserListCache};
pub use self::user_query_service::UserQueryService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use directory::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("User not found"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
