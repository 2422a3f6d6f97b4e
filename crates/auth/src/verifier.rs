//! Credential verification: raw bearer token → verified principal.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{AccountDirectory, AuthError, JwtValidator, Principal, TokenError};

/// Verifies a bearer credential and resolves the acting principal.
///
/// One instance serves the whole process; it holds no per-request state. The
/// account lookup is the single await point in the pipeline and completes
/// before any decision is made, so no decision runs on stale or partial data.
pub struct CredentialVerifier {
    jwt: Arc<dyn JwtValidator>,
    directory: Arc<dyn AccountDirectory>,
}

impl CredentialVerifier {
    pub fn new(jwt: Arc<dyn JwtValidator>, directory: Arc<dyn AccountDirectory>) -> Self {
        Self { jwt, directory }
    }

    /// Authenticate a raw bearer token (if any) as of `now`.
    ///
    /// Order matters: missing credential, then signature, then claim window,
    /// then the live account lookup. The returned principal carries the
    /// **live** role/agency from the record, not the token's claims, so
    /// deactivation and role changes apply immediately.
    pub async fn authenticate(
        &self,
        raw_token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Principal, AuthError> {
        let token = match raw_token.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return Err(AuthError::MissingToken),
        };

        let claims = self.jwt.validate(token, now).map_err(|e| match e {
            TokenError::Expired => AuthError::ExpiredToken,
            TokenError::Invalid(reason) => {
                tracing::debug!(%reason, "token verification failed");
                AuthError::InvalidToken
            }
        })?;

        let record = self
            .directory
            .find_account_by_id(claims.sub)
            .await
            .map_err(|e| {
                // Fail closed: an unavailable directory is never an allow.
                tracing::warn!(error = %e, "account lookup unavailable");
                AuthError::TemporaryAuthFailure(e.to_string())
            })?
            .ok_or(AuthError::PrincipalNotFound)?;

        if !record.is_active {
            return Err(AuthError::PrincipalDeactivated);
        }

        Principal::from_record(claims.sub, record)
    }
}
