//! Cross-origin policy for browser clients.
//!
//! The default policy admits any origin with credentials, any method, and any
//! header. Listing origins narrows it to exactly those.

use actix_cors::Cors;

/// Seconds a browser may cache a preflight result.
pub const DEFAULT_CORS_MAX_AGE: usize = 3600;

/// Origins admitted by the CORS middleware.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

impl CorsPolicy {
    /// Policy admitting any origin.
    pub fn any_origin() -> Self {
        Self::default()
    }

    /// Parse a comma-separated origin list; blank or `*` admits any origin.
    ///
    /// # Examples
    /// ```
    /// use directory::middleware::CorsPolicy;
    ///
    /// assert!(CorsPolicy::from_list("*").allows_any_origin());
    /// let policy = CorsPolicy::from_list("https://app.example.com, https://admin.example.com");
    /// assert_eq!(policy.allowed_origins().len(), 2);
    /// ```
    pub fn from_list(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_owned)
            .collect();
        if origins.iter().any(|origin| origin == "*") {
            return Self::any_origin();
        }
        Self {
            allowed_origins: origins,
        }
    }

    /// Whether every origin is admitted.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty()
    }

    /// Explicitly admitted origins; empty means any.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    /// Build the actix middleware; call once per app factory invocation.
    pub fn build(&self) -> Cors {
        let cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .supports_credentials()
            .max_age(DEFAULT_CORS_MAX_AGE);
        if self.allows_any_origin() {
            return cors.allow_any_origin();
        }
        self.allowed_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::{Method, StatusCode, header};
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    async fn preflight(policy: CorsPolicy, origin: &str) -> actix_web::dev::ServiceResponse<actix_web::body::EitherBody<actix_web::body::BoxBody>> {
        let app = actix_test::init_service(
            App::new()
                .wrap(policy.build())
                .route("/api/login", web::post().to(HttpResponse::Ok)),
        )
        .await;
        let request = actix_test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/login")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
            .to_request();
        actix_test::call_service(&app, request).await
    }

    fn allow_origin(response: &actix_web::dev::ServiceResponse<actix_web::body::EitherBody<actix_web::body::BoxBody>>) -> Option<String> {
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    }

    #[rstest]
    #[case("")]
    #[case("*")]
    #[case(" * , https://app.example.com")]
    fn wildcard_or_blank_admits_any_origin(#[case] raw: &str) {
        assert!(CorsPolicy::from_list(raw).allows_any_origin());
    }

    #[rstest]
    #[actix_web::test]
    async fn preflight_from_any_origin_is_admitted_with_credentials() {
        let response = preflight(CorsPolicy::any_origin(), "http://localhost:3000").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            allow_origin(&response).as_deref(),
            Some("http://localhost:3000")
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .and_then(|value| value.to_str().ok()),
            Some("true")
        );
    }

    #[rstest]
    #[case("https://app.example.com", true)]
    #[case("https://evil.example.com", false)]
    #[actix_web::test]
    async fn listed_origins_narrow_the_policy(#[case] origin: &str, #[case] admitted: bool) {
        let policy = CorsPolicy::from_list("https://app.example.com");

        let response = preflight(policy, origin).await;

        assert_eq!(allow_origin(&response).is_some(), admitted);
    }
}
