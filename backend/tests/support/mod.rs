//! Shared harness for the directory integration tests.
//!
//! Wires the real domain services and HTTP routes over the in-memory
//! adapters from `directory::test_support`, with a manually advanced clock
//! driving every TTL.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Arc;
use std::time::Duration;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use directory::{CorsPolicy, Trace};
use directory::domain::ports::CacheStore;
use directory::domain::{DEFAULT_USER_LIST_TTL, ThrottlePolicy};
use directory::inbound::http::api_scope;
use directory::inbound::http::health::{HealthState, banner, live, ready};
use directory::inbound::http::state::HttpState;
use directory::test_support::{
    InMemoryCacheStore, InMemoryUserRepository, MutableClock, PlainPasswordHasher,
    UnreachableCacheStore,
};

/// Freshness window of the user list snapshot under test.
pub const LIST_TTL: Duration = DEFAULT_USER_LIST_TTL;
/// Lockout window under test.
pub const LOCKOUT_WINDOW: Duration = Duration::from_secs(300);

/// Adapters and state behind one test application.
pub struct Harness {
    pub clock: Arc<MutableClock>,
    pub users: Arc<InMemoryUserRepository>,
    pub cache: Arc<InMemoryCacheStore>,
    pub hasher: Arc<PlainPasswordHasher>,
    state: web::Data<HttpState>,
}

impl Harness {
    /// Harness with a working cache tier.
    pub fn new() -> Self {
        Self::build(true)
    }

    /// Harness whose cache tier refuses every connection.
    pub fn with_unreachable_cache() -> Self {
        Self::build(false)
    }

    fn build(reachable: bool) -> Self {
        let clock = Arc::new(MutableClock::default());
        let users = Arc::new(InMemoryUserRepository::new(clock.clone()));
        let cache = Arc::new(InMemoryCacheStore::new(clock.clone()));
        let hasher = Arc::new(PlainPasswordHasher::new());
        let store: Arc<dyn CacheStore> = if reachable {
            cache.clone()
        } else {
            Arc::new(UnreachableCacheStore)
        };
        let state = HttpState::from_adapters(
            users.clone(),
            hasher.clone(),
            store,
            LIST_TTL,
            ThrottlePolicy::new(5, LOCKOUT_WINDOW),
        );
        Self {
            clock,
            users,
            cache,
            hasher,
            state: web::Data::new(state),
        }
    }

    /// Application with the production route table.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<EitherBody<BoxBody>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        App::new()
            .app_data(health)
            .app_data(self.state.clone())
            .wrap(Trace)
            .wrap(CorsPolicy::any_origin().build())
            .service(api_scope())
            .service(banner)
            .service(ready)
            .service(live)
    }
}

/// Send `request` and decode the JSON body (`Null` when empty).
pub async fn send<S>(app: &S, request: actix_http::Request) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<EitherBody<BoxBody>>, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body is JSON")
    };
    (status, value)
}

pub fn register_request(username: &str, email: &str, password: &str) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({ "username": username, "email": email, "password": password }))
        .to_request()
}

pub fn login_request(username: &str, password: &str) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request()
}

pub fn list_request() -> actix_http::Request {
    actix_test::TestRequest::get().uri("/api/users").to_request()
}

pub fn get_request(id: i64) -> actix_http::Request {
    actix_test::TestRequest::get()
        .uri(&format!("/api/users/{id}"))
        .to_request()
}

pub fn update_request(id: i64, body: Value) -> actix_http::Request {
    actix_test::TestRequest::put()
        .uri(&format!("/api/users/{id}"))
        .set_json(body)
        .to_request()
}

pub fn delete_request(id: i64) -> actix_http::Request {
    actix_test::TestRequest::delete()
        .uri(&format!("/api/users/{id}"))
        .to_request()
}

pub fn cache_stats_request() -> actix_http::Request {
    actix_test::TestRequest::get()
        .uri("/api/cache/stats")
        .to_request()
}

/// `source` tag of a list response.
pub fn source(body: &Value) -> Option<&str> {
    body.get("source").and_then(Value::as_str)
}

/// Usernames of a list response, in order.
pub fn usernames(body: &Value) -> Vec<String> {
    body.get("users")
        .and_then(Value::as_array)
        .map(|users| {
            users
                .iter()
                .filter_map(|user| user.get("username").and_then(Value::as_str))
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

/// Error `code` of an error response.
pub fn code(body: &Value) -> Option<&str> {
    body.get("code").and_then(Value::as_str)
}
