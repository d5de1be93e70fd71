//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: record store selection and service construction
//! - `routes/`: HTTP routes + handlers (one generic CRUD controller, plus auth and charts)
//! - `dto.rs`: request validation against the resource schemas
//! - `errors.rs`: `AppResponse` bodies for success and failure

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig) -> Router {
    router(services::build_services(config))
}

/// Router over already-built services.
pub fn router(services: services::AppServices) -> Router {
    let auth_state = middleware::AuthState {
        jwt: services.jwt.clone(),
    };
    let public = routes::router(&services);
    let services = Arc::new(services);

    let protected = routes::auth::protected_router().route_layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(public)
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_log))
                .layer(Extension(services)),
        )
}
