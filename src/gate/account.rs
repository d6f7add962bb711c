//! Account records and the non-secret summary returned on grant.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// An account as read from the credential store.
///
/// The gate only ever reads this; registration, verification, and approval
/// workflows mutate accounts elsewhere.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    /// PHC-formatted secret hash. `None` means the account has no usable
    /// credential and can never be granted.
    pub secret_hash: Option<String>,
    pub verified: bool,
    pub approved: bool,
    pub name: String,
    pub role: String,
    pub avatar_url: Option<String>,
}

/// Non-secret account fields handed back to the caller on a grant.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Account {
    /// Project the account down to the fields safe to return to a caller.
    #[must_use]
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            email: self.email.clone(),
            role: self.role.clone(),
            name: self.name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}
