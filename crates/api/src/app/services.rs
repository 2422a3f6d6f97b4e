use std::sync::Arc;

use fleetdesk_auth::{AuthorizationGate, PermissionTable};
use fleetdesk_infra::InMemoryAccountDirectory;

/// Shared handles behind every authenticated route.
///
/// The permission table is built once here and reaches handlers two ways:
/// through the gate for decisions, and directly for introspection routes.
pub struct AppServices {
    pub directory: Arc<InMemoryAccountDirectory>,
    pub table: Arc<PermissionTable>,
    pub gate: AuthorizationGate,
}

pub fn build_services(directory: Arc<InMemoryAccountDirectory>) -> AppServices {
    let table = Arc::new(PermissionTable::builtin());
    let gate = AuthorizationGate::new(table.clone());

    AppServices {
        directory,
        table,
        gate,
    }
}
