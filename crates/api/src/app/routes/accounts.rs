//! Account administration endpoints.
//!
//! Every handler runs the same sequence: admit through the gate, resolve the
//! tenant scope, then touch the directory. Cross-tenant writes die in
//! scoping; anything that slips past still dies in the gate.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use fleetdesk_auth::{scope_request, Principal, RequestKind, Role};
use fleetdesk_core::{AccountId, AgencyName};
use fleetdesk_infra::DirectoryAccount;

use crate::app::{dto, errors, services::AppServices};

// ─────────────────────────────────────────────────────────────────────────────
// Query Parameters
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    /// Agency filter; honored verbatim for superadmins, overridden with the
    /// caller's own agency for everyone else.
    pub agency: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────────────────────────

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_account).get(list_accounts))
        .route("/:id", get(get_account))
        .route("/:id/deactivate", post(deactivate_account))
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /accounts - list accounts visible to the caller.
pub async fn list_accounts(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListAccountsQuery>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::admit(&services, &principal, "users:read", None) {
        return errors::auth_error_response(&e);
    }

    let requested = match query.agency.map(AgencyName::new).transpose() {
        Ok(a) => a,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_agency", e.to_string());
        }
    };

    let scoped = match scope_request(&principal, RequestKind::Read, requested) {
        Ok(s) => s,
        Err(e) => return errors::auth_error_response(&e),
    };

    let items: Vec<_> = services
        .directory
        .list(scoped.agency())
        .into_iter()
        .map(dto::account_to_response)
        .collect();

    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

/// POST /accounts - create an account.
pub async fn create_account(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateAccountRequest>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::admit(&services, &principal, "users:create", None) {
        return errors::auth_error_response(&e);
    }

    // Privilege escalation guard: tenant admins administer their agency,
    // never the superadmin tier.
    if body.role == Role::Superadmin && !principal.is_superadmin() {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "only a superadmin may create superadmin accounts",
        );
    }

    let requested = match body.agency_name.map(AgencyName::new).transpose() {
        Ok(a) => a,
        Err(e) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_agency", e.to_string());
        }
    };

    // Rejects foreign agencies, injects the caller's own when absent.
    let scoped = match scope_request(&principal, RequestKind::Write, requested) {
        Ok(s) => s,
        Err(e) => return errors::auth_error_response(&e),
    };

    // Superadmin accounts belong to no agency; every other role needs one.
    let agency = match (body.role, scoped.into_agency()) {
        (Role::Superadmin, _) => None,
        (_, Some(agency)) => Some(agency),
        (_, None) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "validation_error",
                "agencyName is required for tenant-bound roles",
            );
        }
    };

    let account = DirectoryAccount::new(body.email, body.role, agency);
    let response = dto::account_to_response(account.clone());
    if let Err(e) = services.directory.insert(account) {
        return errors::account_store_error_response(e);
    }

    (StatusCode::CREATED, Json(response)).into_response()
}

/// GET /accounts/:id - fetch one account.
///
/// Accounts outside the caller's scope read as absent, exactly as they do
/// in listings.
pub async fn get_account(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::admit(&services, &principal, "users:read", None) {
        return errors::auth_error_response(&e);
    }

    let account_id: AccountId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid account id");
        }
    };

    let scoped = match scope_request(&principal, RequestKind::Read, None) {
        Ok(s) => s,
        Err(e) => return errors::auth_error_response(&e),
    };

    let account = match services.directory.get(account_id) {
        Some(a) => a,
        None => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "account not found"),
    };

    if let Some(filter) = scoped.agency() {
        if account.agency.as_ref() != Some(filter) {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "account not found");
        }
    }

    (StatusCode::OK, Json(dto::account_to_response(account))).into_response()
}

/// POST /accounts/:id/deactivate - disable an account.
///
/// Takes effect on the target's next request: authentication consults the
/// live record, so outstanding tokens stop working immediately.
pub async fn deactivate_account(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let account_id: AccountId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid account id");
        }
    };

    let target = match services.directory.get(account_id) {
        Some(a) => a,
        None => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "account not found"),
    };

    // The gate re-checks tenancy against the target's own agency.
    if let Err(e) = crate::authz::admit(
        &services,
        &principal,
        "users:update",
        target.agency.as_ref(),
    ) {
        return errors::auth_error_response(&e);
    }

    // Agency-less targets are superadmin accounts; only superadmins manage those.
    if target.agency.is_none() && !principal.is_superadmin() {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "superadmin accounts are managed by superadmins only",
        );
    }

    match services.directory.set_active(account_id, false) {
        Ok(updated) => (StatusCode::OK, Json(dto::account_to_response(updated))).into_response(),
        Err(e) => errors::account_store_error_response(e),
    }
}
