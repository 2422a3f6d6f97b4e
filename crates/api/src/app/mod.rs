//! HTTP API application wiring (Axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: shared handles (account directory, permission table, gate)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use fleetdesk_auth::{CredentialVerifier, Hs256JwtValidator};
use fleetdesk_infra::InMemoryAccountDirectory;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router on a fresh, empty account directory.
pub fn build_app(jwt_secret: String) -> Router {
    build_app_with(jwt_secret, InMemoryAccountDirectory::arc())
}

/// Build the router on top of a caller-provided account directory.
///
/// Tests and embedders use this to seed accounts while sharing the exact
/// production wiring.
pub fn build_app_with(jwt_secret: String, directory: Arc<InMemoryAccountDirectory>) -> Router {
    let jwt = Arc::new(Hs256JwtValidator::new(jwt_secret.into_bytes()));
    let verifier = Arc::new(CredentialVerifier::new(jwt, directory.clone()));
    let auth_state = middleware::AuthState { verifier };

    let services = Arc::new(services::build_services(directory));

    // Protected routes: require an authenticated, active principal.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
        .layer(ServiceBuilder::new())
}
