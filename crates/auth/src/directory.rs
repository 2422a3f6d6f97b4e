//! Account lookup collaborator.
//!
//! The verifier needs one question answered per request: "what is the live
//! state of account X right now?" The persistence layer answers it through
//! this trait; the access-control core only observes account state, it never
//! mutates it.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fleetdesk_core::{AccountId, AgencyName};

use crate::Role;

/// Live account state needed for an authorization decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub role: Role,
    /// Owning agency; superadmin accounts may have none.
    pub agency: Option<AgencyName>,
    pub is_active: bool,
}

/// The lookup could not complete for infrastructure reasons (store down,
/// timeout, cancelled request).
///
/// Distinct from "account absent": absence is a *successful* lookup that
/// returned `None`. Callers must fail closed on this error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("account directory unavailable: {0}")]
pub struct DirectoryError(pub String);

impl DirectoryError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Collaborator capable of resolving an account id to its live record.
///
/// This is the only suspension point in the authorization pipeline; the
/// lookup is awaited before any decision is made.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn find_account_by_id(
        &self,
        id: AccountId,
    ) -> Result<Option<AccountRecord>, DirectoryError>;
}

#[async_trait]
impl<D> AccountDirectory for Arc<D>
where
    D: AccountDirectory + ?Sized,
{
    async fn find_account_by_id(
        &self,
        id: AccountId,
    ) -> Result<Option<AccountRecord>, DirectoryError> {
        (**self).find_account_by_id(id).await
    }
}
