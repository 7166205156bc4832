//! HTTP inbound adapter exposing REST endpoints.

pub mod cache;
pub mod error;
pub mod health;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use actix_web::{Scope, web};

/// All `/api` routes with their extractor configuration.
///
/// Callers attach [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use directory::inbound::http::api_scope;
///
/// let _app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(validation::json_config())
        .app_data(validation::path_config())
        .service(users::list_users)
        .service(users::get_user)
        .service(users::register)
        .service(users::login)
        .service(users::update_user)
        .service(users::delete_user)
        .service(cache::cache_stats)
}
