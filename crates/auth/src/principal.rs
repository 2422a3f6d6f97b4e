use fleetdesk_core::{AccountId, AgencyName};

use crate::{AccountRecord, AuthError, Role};

/// A fully resolved principal for authorization decisions.
///
/// Constructed fresh per request by the credential verifier from a verified
/// token plus the live account record, and discarded at end of request.
/// Never persisted or cached across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: AccountId,
    pub role: Role,
    /// Owning agency. `None` for superadmins, who are not tenant-scoped.
    pub agency: Option<AgencyName>,
    pub is_active: bool,
}

impl Principal {
    /// Build a principal from the live account record.
    ///
    /// The record's role/agency win over anything the token claimed, so a
    /// role change or tenant reassignment takes effect before the token's
    /// natural expiry. A superadmin's agency is dropped (superadmins target
    /// tenants explicitly); any other record without an agency cannot be
    /// tenant-scoped and is rejected.
    pub fn from_record(id: AccountId, record: AccountRecord) -> Result<Self, AuthError> {
        let agency = match (record.role, record.agency) {
            (Role::Superadmin, _) => None,
            (_, Some(agency)) => Some(agency),
            (_, None) => return Err(AuthError::PrincipalNotFound),
        };

        Ok(Self {
            id,
            role: record.role,
            agency,
            is_active: record.is_active,
        })
    }

    pub fn is_superadmin(&self) -> bool {
        self.role.is_superadmin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superadmin_agency_is_dropped() {
        let record = AccountRecord {
            role: Role::Superadmin,
            agency: Some(AgencyName::new("Acme").unwrap()),
            is_active: true,
        };
        let principal = Principal::from_record(AccountId::new(), record).unwrap();
        assert_eq!(principal.agency, None);
        assert!(principal.is_superadmin());
    }

    #[test]
    fn tenant_roles_keep_their_agency() {
        let record = AccountRecord {
            role: Role::Manager,
            agency: Some(AgencyName::new("Acme").unwrap()),
            is_active: true,
        };
        let principal = Principal::from_record(AccountId::new(), record).unwrap();
        assert_eq!(principal.agency.unwrap().as_str(), "Acme");
    }

    #[test]
    fn tenant_role_without_agency_is_rejected() {
        let record = AccountRecord {
            role: Role::Admin,
            agency: None,
            is_active: true,
        };
        let err = Principal::from_record(AccountId::new(), record).unwrap_err();
        assert_eq!(err, AuthError::PrincipalNotFound);
    }
}
