use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use fleetdesk_auth::AuthError;
use fleetdesk_infra::AccountStoreError;

/// Map an auth-layer rejection onto the wire.
///
/// Every kind keeps its own stable code so clients can react precisely; an
/// expired token is a silent refresh, an invalid one is a re-login, a
/// deactivated principal is neither.
pub fn auth_error_response(err: &AuthError) -> axum::response::Response {
    let (status, code) = match err {
        AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "missing_token"),
        AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
        AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "expired_token"),
        AuthError::PrincipalNotFound => (StatusCode::UNAUTHORIZED, "principal_not_found"),
        AuthError::PrincipalDeactivated => (StatusCode::UNAUTHORIZED, "principal_deactivated"),
        AuthError::Unauthenticated => (StatusCode::UNAUTHORIZED, "unauthenticated"),
        AuthError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
        AuthError::CrossTenantForbidden => (StatusCode::FORBIDDEN, "cross_tenant_forbidden"),
        AuthError::TemporaryAuthFailure(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, "auth_unavailable")
        }
    };

    json_error(status, code, err.to_string())
}

pub fn account_store_error_response(err: AccountStoreError) -> axum::response::Response {
    match &err {
        AccountStoreError::AlreadyExists(_) => {
            json_error(StatusCode::CONFLICT, "conflict", err.to_string())
        }
        AccountStoreError::EmailTaken(_) => {
            json_error(StatusCode::CONFLICT, "email_taken", err.to_string())
        }
        AccountStoreError::NotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "account not found")
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
