use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of an account within the back office.
///
/// The role set is a **closed** enumeration: adding a role is a
/// deployment-time change, never a request-time one. Role strings arriving
/// from the outside (token claims, query parameters) must parse into this
/// enum; anything unknown carries no permissions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Oversees all agencies. Exempt from tenant isolation and from
    /// explicit permission checks.
    Superadmin,
    /// Full management of a single agency.
    Admin,
    /// Day-to-day operations within an agency.
    Manager,
    /// Fuel-transaction management only.
    Fuel,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    /// Every role, in declaration order. The permission table is total over
    /// this list.
    pub const ALL: [Role; 4] = [Role::Superadmin, Role::Admin, Role::Manager, Role::Fuel];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Fuel => "fuel",
        }
    }

    pub fn is_superadmin(&self) -> bool {
        matches!(self, Role::Superadmin)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "superadmin" => Ok(Role::Superadmin),
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "fuel" => Ok(Role::Fuel),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}
