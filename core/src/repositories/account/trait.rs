//! Account repository trait defining the interface for credential storage.
//!
//! The account flows only need lookups by id, email and username plus a few
//! narrow writes. Implementations own persistence; the core never sees rows.

use async_trait::async_trait;

use crate::domain::entities::account::{Account, AccountId, NewAccount};
use crate::domain::entities::credential::Credential;
use crate::errors::DomainError;

/// Repository trait for Account persistence operations
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by id
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DomainError>;

    /// Find an account by normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError>;

    /// Insert a new, unverified account and assign its id
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))` - Email taken
    async fn create(&self, account: NewAccount) -> Result<Account, DomainError>;

    /// Mark an account as verified
    async fn mark_verified(&self, id: AccountId) -> Result<(), DomainError>;

    /// Rename an account
    ///
    /// # Returns
    /// * `Ok(Account)` - The updated account
    /// * `Err(DomainError::Auth(AuthError::UsernameTaken))` - Another account holds the name
    /// * `Err(DomainError::NotFound)` - Unknown id
    async fn update_username(
        &self,
        id: AccountId,
        username: &str,
    ) -> Result<Account, DomainError>;

    /// Replace the stored credential wholesale
    async fn update_credential(
        &self,
        id: AccountId,
        credential: Credential,
    ) -> Result<(), DomainError>;
}
