//! API-side authorization guard.
//!
//! Handlers call [`admit`] before acting, so every denial flows through the
//! same gate and the same error mapping regardless of route.

use fleetdesk_auth::{AuthError, Principal};
use fleetdesk_core::AgencyName;

use crate::app::services::AppServices;

/// Check that `principal` may exercise `required`, optionally against a
/// resource owned by `resource_tenant`.
///
/// This is intended to be called **before** any mutation is applied.
pub fn admit(
    services: &AppServices,
    principal: &Principal,
    required: &str,
    resource_tenant: Option<&AgencyName>,
) -> Result<(), AuthError> {
    services
        .gate
        .authorize(Some(principal), required, resource_tenant)
}
