use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use fleetdesk_auth::CredentialVerifier;

use crate::app::errors;

#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<CredentialVerifier>,
}

/// Authenticate every request behind this layer and stash the resolved
/// [`fleetdesk_auth::Principal`] as a request extension.
///
/// No handler runs without a live, active principal; rejection bypasses the
/// handler entirely.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let outcome = {
        let token = extract_bearer(req.headers());
        state.verifier.authenticate(token, Utc::now()).await
    };

    match outcome {
        Ok(principal) => {
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        Err(err) => errors::auth_error_response(&err),
    }
}

/// Pull the bearer token out of the `Authorization` header.
///
/// Anything short of a well-formed `Bearer <token>` counts as "no
/// credential"; the verifier reports that as a missing token.
fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(token)
}
