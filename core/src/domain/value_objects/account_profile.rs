//! Public account views for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::account::{Account, AccountId};

/// Account data safe to return to clients (no credential)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountProfile {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub is_verified: bool,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            email: account.email.clone(),
            is_verified: account.is_verified,
        }
    }
}

/// Successful login result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    /// Signed session token
    pub access_token: String,

    /// Always `"bearer"`
    pub token_type: String,

    /// Session lifetime in seconds
    pub expires_in: i64,

    pub account: AccountProfile,
}

impl LoginResponse {
    pub fn bearer(access_token: String, expires_in: i64, account: AccountProfile) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
            account,
        }
    }
}
