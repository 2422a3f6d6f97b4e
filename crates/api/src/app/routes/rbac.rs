//! Authorization introspection endpoints.
//!
//! The permission table lives server-side only. UIs that need to show or
//! hide controls ask these endpoints instead of shipping a copy of the
//! policy that could drift from the one actually enforced.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use fleetdesk_auth::Principal;
use fleetdesk_core::AgencyName;

use crate::app::{errors, services::AppServices};

#[derive(Debug, Deserialize)]
pub struct CanQuery {
    pub permission: String,
    pub agency: Option<String>,
}

pub fn router() -> Router {
    Router::new()
        .route("/roles", get(list_roles))
        .route("/can", get(can))
}

/// GET /authz/roles - every role and the grants behind it.
///
/// Open to any authenticated principal; knowing the table is not a
/// privilege, exercising it is.
pub async fn list_roles(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let roles: Vec<_> = services
        .table
        .entries()
        .map(|(role, grants)| {
            serde_json::json!({
                "role": role.as_str(),
                "grants": grants.iter().collect::<Vec<_>>(),
            })
        })
        .collect();

    (StatusCode::OK, Json(serde_json::json!({ "roles": roles }))).into_response()
}

/// GET /authz/can?permission=X&agency=Y - evaluate a permission for the
/// calling principal without performing the operation.
///
/// Runs the same gate as the real routes, so the answer can never disagree
/// with what a subsequent request would do.
pub async fn can(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<CanQuery>,
) -> axum::response::Response {
    let agency = match query.agency.map(AgencyName::new).transpose() {
        Ok(a) => a,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_agency", e.to_string());
        }
    };

    let allowed = services
        .gate
        .authorize(Some(&principal), &query.permission, agency.as_ref())
        .is_ok();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "permission": query.permission,
            "allowed": allowed,
        })),
    )
        .into_response()
}
