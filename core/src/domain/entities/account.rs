//! Account entity owned by the credential store.

use chrono::{DateTime, Utc};

use super::credential::Credential;

/// Numeric account identifier assigned by the store
pub type AccountId = i64;

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,

    /// Unique login name derived from the email local part
    pub username: String,

    /// Normalized (lowercase) email address
    pub email: String,

    pub credential: Credential,

    /// Set once the signup OTP has been confirmed
    pub is_verified: bool,

    pub created_at: DateTime<Utc>,
}

/// Data needed to create an account; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub credential: Credential,
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    /// Builds the stored account once an id has been assigned
    pub fn into_account(self, id: AccountId) -> Account {
        Account {
            id,
            username: self.username,
            email: self.email,
            credential: self.credential,
            is_verified: false,
            created_at: self.created_at,
        }
    }
}

/// Candidate usernames for an email local part: `ana`, `ana1`, `ana2`, ...
pub fn username_candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(base.to_string())
        .chain((1u32..).map(move |suffix| format!("{}{}", base, suffix)))
}
