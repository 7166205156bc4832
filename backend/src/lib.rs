//! User directory service library.
//!
//! Hexagonal layout: [`domain`] holds the business rules and ports,
//! [`outbound`] the Postgres, Redis, and bcrypt adapters, and [`inbound`] the
//! HTTP surface.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::{CorsPolicy, Trace};
pub use settings::DirectorySettings;
