//! In-memory implementation of AccountRepository for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::account::{Account, AccountId, NewAccount};
use crate::domain::entities::credential::Credential;
use crate::errors::{AuthError, DomainError};

use super::trait_::AccountRepository;

#[derive(Default)]
struct Table {
    next_id: AccountId,
    accounts: HashMap<AccountId, Account>,
}

/// Account repository backed by a process-local map
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryAccountRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.table.read().await.accounts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn not_found(id: AccountId) -> DomainError {
    DomainError::NotFound {
        resource: format!("account {}", id),
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, DomainError> {
        Ok(self.table.read().await.accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let table = self.table.read().await;
        Ok(table.accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, DomainError> {
        let mut table = self.table.write().await;

        if table.accounts.values().any(|a| a.email == account.email) {
            return Err(DomainError::Auth(AuthError::EmailAlreadyRegistered));
        }
        if table.accounts.values().any(|a| a.username == account.username) {
            return Err(DomainError::Auth(AuthError::UsernameTaken));
        }

        table.next_id += 1;
        let stored = account.into_account(table.next_id);
        table.accounts.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn mark_verified(&self, id: AccountId) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        let account = table.accounts.get_mut(&id).ok_or_else(|| not_found(id))?;
        account.is_verified = true;
        Ok(())
    }

    async fn update_username(
        &self,
        id: AccountId,
        username: &str,
    ) -> Result<Account, DomainError> {
        let mut table = self.table.write().await;

        if table
            .accounts
            .values()
            .any(|a| a.id != id && a.username == username)
        {
            return Err(DomainError::Auth(AuthError::UsernameTaken));
        }

        let account = table.accounts.get_mut(&id).ok_or_else(|| not_found(id))?;
        account.username = username.to_string();
        Ok(account.clone())
    }

    async fn update_credential(
        &self,
        id: AccountId,
        credential: Credential,
    ) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        let account = table.accounts.get_mut(&id).ok_or_else(|| not_found(id))?;
        account.credential = credential;
        Ok(())
    }
}
