//! Account storage, the live source of truth behind credential verification.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fleetdesk_auth::{AccountDirectory, AccountRecord, DirectoryError, Role};
use fleetdesk_core::{AccountId, AgencyName};

/// One stored account.
///
/// The agency is optional only for superadmin accounts; every tenant-bound
/// role carries one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryAccount {
    pub id: AccountId,
    pub email: String,
    pub role: Role,
    pub agency: Option<AgencyName>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl DirectoryAccount {
    /// A fresh, active account.
    pub fn new(email: impl Into<String>, role: Role, agency: Option<AgencyName>) -> Self {
        Self {
            id: AccountId::new(),
            email: email.into(),
            role,
            agency,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn record(&self) -> AccountRecord {
        AccountRecord {
            role: self.role,
            agency: self.agency.clone(),
            is_active: self.is_active,
        }
    }
}

/// Account store error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AccountStoreError {
    #[error("account already exists: {0}")]
    AlreadyExists(AccountId),
    #[error("email already registered: {0}")]
    EmailTaken(String),
    #[error("account not found: {0}")]
    NotFound(AccountId),
}

/// In-memory account directory for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAccountDirectory {
    accounts: RwLock<HashMap<AccountId, DirectoryAccount>>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Store a new account. Emails are unique case-insensitively.
    pub fn insert(&self, account: DirectoryAccount) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().unwrap();
        if accounts.contains_key(&account.id) {
            return Err(AccountStoreError::AlreadyExists(account.id));
        }
        if accounts
            .values()
            .any(|a| a.email.eq_ignore_ascii_case(&account.email))
        {
            return Err(AccountStoreError::EmailTaken(account.email));
        }
        accounts.insert(account.id, account);
        Ok(())
    }

    pub fn get(&self, id: AccountId) -> Option<DirectoryAccount> {
        let accounts = self.accounts.read().ok()?;
        accounts.get(&id).cloned()
    }

    /// List accounts, optionally restricted to one agency, oldest first.
    pub fn list(&self, agency: Option<&AgencyName>) -> Vec<DirectoryAccount> {
        let accounts = match self.accounts.read() {
            Ok(a) => a,
            Err(_) => return vec![],
        };

        let mut result: Vec<_> = accounts
            .values()
            .filter(|a| agency.map_or(true, |wanted| a.agency.as_ref() == Some(wanted)))
            .cloned()
            .collect();

        result.sort_by_key(|a| (a.created_at, *a.id.as_uuid()));
        result
    }

    /// Flip an account's active flag, returning the updated record.
    pub fn set_active(
        &self,
        id: AccountId,
        is_active: bool,
    ) -> Result<DirectoryAccount, AccountStoreError> {
        let mut accounts = self.accounts.write().unwrap();
        let account = accounts
            .get_mut(&id)
            .ok_or(AccountStoreError::NotFound(id))?;
        account.is_active = is_active;
        if !is_active {
            tracing::info!(account = %id, "account deactivated");
        }
        Ok(account.clone())
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn find_account_by_id(
        &self,
        id: AccountId,
    ) -> Result<Option<AccountRecord>, DirectoryError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| DirectoryError::new("account store lock poisoned"))?;
        Ok(accounts.get(&id).map(DirectoryAccount::record))
    }
}
