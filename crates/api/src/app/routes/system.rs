use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use fleetdesk_auth::Principal;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// The caller's resolved identity, straight from the live directory record.
pub async fn whoami(Extension(principal): Extension<Principal>) -> impl IntoResponse {
    Json(serde_json::json!({
        "id": principal.id.to_string(),
        "role": principal.role.as_str(),
        "agency": principal.agency.as_ref().map(|a| a.as_str()),
    }))
}
