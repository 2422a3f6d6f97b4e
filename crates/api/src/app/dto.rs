use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fleetdesk_auth::Role;
use fleetdesk_infra::DirectoryAccount;

// -------------------------
// Request DTOs
// -------------------------

/// Create-account payload.
///
/// `agencyName` is optional: tenant-bound callers get their own agency
/// injected when it is absent, and superadmins may omit it for accounts that
/// belong to no agency.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub email: String,
    pub role: Role,
    pub agency_name: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub agency_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

pub fn account_to_response(account: DirectoryAccount) -> AccountResponse {
    AccountResponse {
        id: account.id.to_string(),
        email: account.email,
        role: account.role,
        agency_name: account.agency.map(|a| a.to_string()),
        is_active: account.is_active,
        created_at: account.created_at,
    }
}
