//! EduWarn Nepal backend library.
//!
//! Hexagonal layout: `domain` owns the learning rules and port traits,
//! `inbound::http` exposes them over actix-web and `outbound` provides the
//! hosted table store and the in-memory development store.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
