//! Role → permission-grant table and the resolution algorithm.
//!
//! Grants are opaque capability strings of shape `resource`,
//! `resource:action`, or the wildcard form `resource:all`. The table is
//! immutable process-wide configuration: it is built once at startup and no
//! runtime mutation path exists. It is also the **only** declaration of the
//! policy: presentation layers query the same decision through an API
//! instead of re-declaring it.

use std::collections::{BTreeSet, HashMap};
use std::str::FromStr;

use crate::Role;

/// Immutable mapping of role → granted capability strings.
///
/// The table is total: every [`Role`] has an entry, possibly empty. The
/// superadmin entry stays empty on purpose: "all permissions" is the
/// resolver's bypass, never an enumeration that could drift out of date.
#[derive(Debug, Clone)]
pub struct PermissionTable {
    grants: HashMap<Role, BTreeSet<String>>,
    empty: BTreeSet<String>,
}

impl PermissionTable {
    /// The compiled-in table for the transport back office.
    ///
    /// Changing a grant here is a deployment-time change.
    pub fn builtin() -> Self {
        Self::from_grants([
            (Role::Superadmin, &[][..]),
            (
                Role::Admin,
                &[
                    "drivers:all",
                    "buses:all",
                    "shifts:all",
                    "fueltransactions:all",
                    "packages:all",
                    "users:all",
                    "agencies:read",
                    "profile:all",
                ][..],
            ),
            (
                Role::Manager,
                &[
                    "drivers:read",
                    "buses:read",
                    "shifts:all",
                    "packages:all",
                    "fueltransactions:read",
                    "profile:all",
                ][..],
            ),
            (
                Role::Fuel,
                &["fueltransactions:all", "profile:read", "profile:update"][..],
            ),
        ])
    }

    /// Build a table from explicit grants.
    ///
    /// Roles missing from the input get an empty entry, preserving totality.
    pub fn from_grants<'a, I, S>(grants: I) -> Self
    where
        I: IntoIterator<Item = (Role, &'a [S])>,
        S: AsRef<str> + 'a,
    {
        let mut table: HashMap<Role, BTreeSet<String>> = Role::ALL
            .into_iter()
            .map(|role| (role, BTreeSet::new()))
            .collect();

        for (role, perms) in grants {
            let entry = table.entry(role).or_default();
            for perm in perms {
                entry.insert(perm.as_ref().to_string());
            }
        }

        Self {
            grants: table,
            empty: BTreeSet::new(),
        }
    }

    /// The grant set for a role. Total over the enum.
    pub fn grants_for(&self, role: Role) -> &BTreeSet<String> {
        self.grants.get(&role).unwrap_or(&self.empty)
    }

    /// Iterate the table (roles in declaration order) for introspection.
    pub fn entries(&self) -> impl Iterator<Item = (Role, &BTreeSet<String>)> {
        Role::ALL.into_iter().map(|role| (role, self.grants_for(role)))
    }

    /// Decide whether `role` may exercise `required`.
    ///
    /// 1. Superadmin → allowed unconditionally, independent of the table.
    /// 2. Exact string match against the role's grants.
    /// 3. Wildcard: split `required` on the **first** `:`; if the grants
    ///    contain `"<left side>:all"`, allow.
    ///
    /// A `required` with no `:` uses itself as the prefix, so the wildcard
    /// probe is `"<required>:all"` and matches only when the table defines
    /// that exact string. There is no other partial or prefix matching.
    ///
    /// Pure and deterministic; safe to call from any thread.
    pub fn has_permission(&self, role: Role, required: &str) -> bool {
        if role.is_superadmin() {
            return true;
        }

        let grants = self.grants_for(role);
        if grants.contains(required) {
            return true;
        }

        let resource = match required.split_once(':') {
            Some((resource, _action)) => resource,
            None => required,
        };
        grants.contains(&format!("{resource}:all"))
    }

    /// String-level entry point for untrusted role names.
    ///
    /// Unknown roles resolve to "no permission": they are absent from the
    /// closed enumeration, hence absent from the table.
    pub fn has_permission_claim(&self, role: &str, required: &str) -> bool {
        match Role::from_str(role) {
            Ok(role) => self.has_permission(role, required),
            Err(_) => false,
        }
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::builtin()
    }
}
