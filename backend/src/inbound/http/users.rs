//! Users API handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! POST   /api/register {"username":"alice","email":"alice@example.com","password":"pw1"}
//! POST   /api/login    {"username":"alice","password":"pw1"}
//! PUT    /api/users/{id} {"role":"admin"}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::ListSource;
use crate::domain::{Error, LoginCredentials, Registration, User, UserChanges, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{change_validation_error, credential_validation_error};

pub const USER_CREATED_MESSAGE: &str = "User created successfully";
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";
pub const USER_UPDATED_MESSAGE: &str = "User updated successfully";
pub const USER_DELETED_MESSAGE: &str = "User deleted successfully";

/// Registration request body for `POST /api/register`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "pw1")]
    pub password: String,
}

/// Login request body for `POST /api/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Partial update body for `PUT /api/users/{id}`.
///
/// Absent fields are left unchanged; a present but blank field is rejected.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// User list with its provenance.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<User>,
    pub source: ListSource,
}

/// Confirmation message accompanied by the affected user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserEnvelope {
    pub message: String,
    pub user: User,
}

/// Bare confirmation message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = Error;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.email, &value.password)
            .map_err(change_validation_error)
    }
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = Error;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
            .map_err(credential_validation_error)
    }
}

impl TryFrom<UpdateUserRequest> for UserChanges {
    type Error = Error;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.email.as_deref(),
            value.password.as_deref(),
            value.role.as_deref(),
        )
        .map_err(change_validation_error)
    }
}

fn envelope(message: &str, user: User) -> UserEnvelope {
    UserEnvelope {
        message: message.to_owned(),
        user,
    }
}

/// List every user, served from the cache when a fresh snapshot exists.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use directory::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users ordered by id", body = UserListResponse),
        (status = 500, description = "Durable store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UserListResponse>> {
    let listing = state.users_query.list_users().await?;
    Ok(web::Json(UserListResponse {
        users: listing.users,
        source: listing.source,
    }))
}

/// Fetch a single user by id.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Durable store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .users_query
        .get_user(UserId::new(path.into_inner()))
        .await?;
    Ok(web::Json(user))
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created", body = UserEnvelope),
        (status = 400, description = "Invalid request, or username or email already exists (`conflict`)", body = Error),
        (status = 500, description = "Durable store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner())?;
    let user = state.users_command.register(registration).await?;
    info!(user_id = %user.id(), "user registered");
    Ok(HttpResponse::Created().json(envelope(USER_CREATED_MESSAGE, user)))
}

/// Authenticate a user, subject to the login throttle.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = UserEnvelope),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 429, description = "Too many failed attempts", body = Error),
        (status = 500, description = "Durable store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())?;
    let user = state.login.authenticate(&credentials).await?;
    Ok(web::Json(envelope(LOGIN_SUCCESS_MESSAGE, user)))
}

/// Apply a partial update to an account.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserEnvelope),
        (status = 400, description = "Invalid request, or email already exists (`conflict`)", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Durable store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser",
    security([])
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let changes = UserChanges::try_from(payload.into_inner())?;
    let user = state
        .users_command
        .update(UserId::new(path.into_inner()), changes)
        .await?;
    Ok(web::Json(envelope(USER_UPDATED_MESSAGE, user)))
}

/// Delete an account.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Durable store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser",
    security([])
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = UserId::new(path.into_inner());
    state.users_command.delete(id).await?;
    info!(user_id = %id, "user deleted");
    Ok(web::Json(MessageResponse {
        message: USER_DELETED_MESSAGE.to_owned(),
    }))
}
