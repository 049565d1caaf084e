//! Server construction and middleware wiring.

pub mod config;

pub use config::{BuildMode, ServerConfig, ServerConfigError, server_config_from_env};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{AccountService, CredentialVerifier};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{create_user, issue_token, profile_resource};
use crate::middleware::trace::Trace;
use crate::outbound::{InMemoryTokenIssuer, InMemoryUserRepository};

/// Shared state handed to every worker's app instance.
#[derive(Clone)]
pub struct AppDependencies {
    /// Readiness and liveness flags served by the health probes.
    pub health_state: web::Data<HealthState>,
    /// Domain services and ports used by the user endpoints.
    pub http_state: web::Data<HttpState>,
}

/// Wire the HTTP state with the in-memory adapters.
///
/// One user repository instance is shared between the account service, the
/// credential verifier, and the bearer-token extractor so they all observe
/// the same accounts.
#[must_use]
pub fn default_http_state() -> HttpState {
    let users = Arc::new(InMemoryUserRepository::new());
    HttpState::new(
        Arc::new(AccountService::new(users.clone())),
        Arc::new(CredentialVerifier::new(users.clone())),
        Arc::new(InMemoryTokenIssuer::new()),
        users,
    )
}

/// Assemble the application with routing, shared state, and middleware.
///
/// Swagger UI is mounted under `/docs` in debug builds only.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let user = web::scope("/user")
        .service(create_user)
        .service(issue_token)
        .service(profile_resource());

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(user)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Parameters
/// - `health_state`: shared readiness state marked ready once the listener is bound.
/// - `config`: pre-built [`ServerConfig`] with the bind address.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(default_http_state());
    let ServerConfig { bind_addr } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
