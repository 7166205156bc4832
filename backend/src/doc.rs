//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the request and response schemas they reference. The generated
//! document is served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::ports::ListSource;
use crate::domain::{Error, ErrorCode, User};
use crate::inbound::http::cache::CacheStatsResponse;
use crate::inbound::http::health::ServiceBanner;
use crate::inbound::http::users::{
    LoginRequest, MessageResponse, RegisterRequest, UpdateUserRequest, UserEnvelope,
    UserListResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Directory API",
        description = "User accounts with a cached listing and throttled login."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::cache::cache_stats,
        crate::inbound::http::health::banner,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Error,
        ErrorCode,
        ListSource,
        RegisterRequest,
        LoginRequest,
        UpdateUserRequest,
        UserListResponse,
        UserEnvelope,
        MessageResponse,
        CacheStatsResponse,
        ServiceBanner,
    )),
    tags(
        (name = "users", description = "User directory operations"),
        (name = "cache", description = "Cache tier diagnostics"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
