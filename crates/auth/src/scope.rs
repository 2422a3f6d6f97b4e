//! Tenant isolation: resolving the agency scope of one operation.

use serde::{Deserialize, Serialize};

use fleetdesk_core::AgencyName;

use crate::{AuthError, Principal};

/// Whether the operation being scoped reads or mutates tenant data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Read,
    /// Create, update, or delete.
    Write,
}

/// A request whose tenant scope has been resolved.
///
/// For reads, `agency` is the filter every query must apply (`None` means
/// "all agencies", reachable only by superadmins). For writes, `agency` is
/// the tenant value the payload carries onward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedRequest {
    kind: RequestKind,
    agency: Option<AgencyName>,
}

impl ScopedRequest {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn agency(&self) -> Option<&AgencyName> {
        self.agency.as_ref()
    }

    pub fn into_agency(self) -> Option<AgencyName> {
        self.agency
    }
}

/// Resolve the tenant scope of one operation. Runs after authentication and
/// before domain logic; deterministic for identical inputs.
///
/// - **Superadmin**: the caller-supplied value passes through untouched (an
///   absent read filter means "all agencies"). No rejection path.
/// - **Non-superadmin, read**: the filter is forced to the caller's own
///   agency, overwriting any supplied value. List and detail reads can never
///   enumerate another tenant's data, and most read paths never meant to
///   supply a tenant anyway, so overriding beats rejecting.
/// - **Non-superadmin, write**: a payload naming a *different* agency is
///   rejected; a payload naming none gets the caller's agency injected. The
///   asymmetry is deliberate: an explicit wrong tenant on a write is a
///   hostile signal, an unset one is routine.
pub fn scope_request(
    principal: &Principal,
    kind: RequestKind,
    requested: Option<AgencyName>,
) -> Result<ScopedRequest, AuthError> {
    if principal.is_superadmin() {
        return Ok(ScopedRequest {
            kind,
            agency: requested,
        });
    }

    // A verifier-built principal always carries its agency here; anything
    // else fails closed rather than widening the scope.
    let own = principal
        .agency
        .clone()
        .ok_or(AuthError::CrossTenantForbidden)?;

    let agency = match kind {
        RequestKind::Read => own,
        RequestKind::Write => match requested {
            Some(supplied) if supplied != own => return Err(AuthError::CrossTenantForbidden),
            Some(supplied) => supplied,
            None => own,
        },
    };

    Ok(ScopedRequest {
        kind,
        agency: Some(agency),
    })
}
