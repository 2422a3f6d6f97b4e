//! The authorization gate every protected operation passes through.

use std::sync::Arc;

use fleetdesk_core::AgencyName;

use crate::{AuthError, PermissionTable, Principal};

/// Combines the permission table with a final tenant check.
///
/// The tenant check overlaps with request scoping on purpose: scoping can be
/// skipped by a mis-wired handler, the gate cannot, so a cross-tenant access
/// still dies here.
#[derive(Clone)]
pub struct AuthorizationGate {
    table: Arc<PermissionTable>,
}

impl AuthorizationGate {
    pub fn new(table: Arc<PermissionTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// Admit or reject one operation.
    ///
    /// Checks run in order and stop at the first failure:
    /// 1. a missing or deactivated principal is [`AuthError::Unauthenticated`];
    /// 2. a role without the required permission is [`AuthError::Forbidden`];
    /// 3. a non-superadmin touching a resource owned by another agency is
    ///    [`AuthError::Forbidden`] as well. At this stage the caller is a
    ///    known, permitted user reaching across tenants, and the response
    ///    deliberately does not distinguish that from a plain permission miss.
    pub fn authorize(
        &self,
        principal: Option<&Principal>,
        required: &str,
        resource_tenant: Option<&AgencyName>,
    ) -> Result<(), AuthError> {
        let principal = match principal {
            Some(p) if p.is_active => p,
            _ => return Err(AuthError::Unauthenticated),
        };

        if !self.table.has_permission(principal.role, required) {
            tracing::debug!(role = %principal.role.as_str(), required, "permission denied");
            return Err(AuthError::Forbidden(required.to_string()));
        }

        if !principal.is_superadmin() {
            if let Some(target) = resource_tenant {
                if principal.agency.as_ref() != Some(target) {
                    tracing::debug!(
                        role = %principal.role.as_str(),
                        required,
                        target = %target,
                        "cross-tenant access denied"
                    );
                    return Err(AuthError::Forbidden(required.to_string()));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetdesk_core::AccountId;

    use crate::Role;

    fn gate() -> AuthorizationGate {
        AuthorizationGate::new(Arc::new(PermissionTable::builtin()))
    }

    fn agency(name: &str) -> AgencyName {
        AgencyName::new(name).unwrap()
    }

    fn principal(role: Role, agency_name: Option<&str>, is_active: bool) -> Principal {
        Principal {
            id: AccountId::new(),
            role,
            agency: agency_name.map(agency),
            is_active,
        }
    }

    #[test]
    fn missing_principal_is_unauthenticated() {
        let err = gate().authorize(None, "drivers:read", None).unwrap_err();
        assert_eq!(err, AuthError::Unauthenticated);
    }

    #[test]
    fn deactivated_principal_is_unauthenticated_not_forbidden() {
        let p = principal(Role::Admin, Some("Acme"), false);
        let err = gate()
            .authorize(Some(&p), "drivers:read", None)
            .unwrap_err();
        assert_eq!(err, AuthError::Unauthenticated);
    }

    #[test]
    fn role_without_permission_is_forbidden() {
        let p = principal(Role::Fuel, Some("Acme"), true);
        let err = gate().authorize(Some(&p), "buses:read", None).unwrap_err();
        assert_eq!(err, AuthError::Forbidden("buses:read".into()));
    }

    #[test]
    fn permitted_same_tenant_access_is_admitted() {
        let p = principal(Role::Manager, Some("Acme"), true);
        gate()
            .authorize(Some(&p), "shifts:update", Some(&agency("Acme")))
            .unwrap();
    }

    #[test]
    fn cross_tenant_access_is_forbidden_despite_permission() {
        let p = principal(Role::Admin, Some("Acme"), true);
        let err = gate()
            .authorize(Some(&p), "drivers:read", Some(&agency("Other")))
            .unwrap_err();
        // Same error kind as a permission miss, by design.
        assert_eq!(err, AuthError::Forbidden("drivers:read".into()));
    }

    #[test]
    fn superadmin_skips_both_permission_and_tenant_checks() {
        let p = principal(Role::Superadmin, None, true);
        gate()
            .authorize(Some(&p), "anything:at:all", Some(&agency("Other")))
            .unwrap();
    }

    #[test]
    fn untargeted_operations_skip_the_tenant_check() {
        let p = principal(Role::Fuel, Some("Acme"), true);
        gate()
            .authorize(Some(&p), "fueltransactions:create", None)
            .unwrap();
    }
}
