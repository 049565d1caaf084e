//! Account backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request trace identifier propagated through logs and response headers.
pub use domain::TraceId;
/// Middleware attaching a trace identifier to each request.
pub use middleware::Trace;
