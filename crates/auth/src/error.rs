//! Access-control error taxonomy.

use thiserror::Error;

/// Terminal access-control failure for the current request.
///
/// Each kind identifies the failure precisely so the transport layer can map
/// it to an accurate status code and message ("log in again" is not "you
/// don't have access"). This core never retries; only
/// [`AuthError::TemporaryAuthFailure`] is sensibly retryable by the caller.
/// No kind ever results in partial execution of a write.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No credential supplied.
    #[error("missing bearer token")]
    MissingToken,

    /// Malformed, forged, or unverifiable credential.
    #[error("invalid token")]
    InvalidToken,

    /// Credential structurally valid but past expiry.
    #[error("token has expired")]
    ExpiredToken,

    /// Credential valid but the subject no longer exists.
    #[error("principal not found")]
    PrincipalNotFound,

    /// Subject exists but is disabled.
    #[error("principal is deactivated")]
    PrincipalDeactivated,

    /// An absent or inactive principal reached an authorization gate.
    #[error("unauthenticated")]
    Unauthenticated,

    /// Authenticated principal lacks the required permission.
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),

    /// Authenticated principal attempted to write another tenant's data.
    #[error("cross-tenant access forbidden")]
    CrossTenantForbidden,

    /// The account lookup could not complete (infra failure/timeout).
    /// Retryable by the transport layer; never an implicit allow.
    #[error("temporary authentication failure: {0}")]
    TemporaryAuthFailure(String),
}
