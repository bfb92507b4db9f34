//! In-memory implementation of the account repository.
//!
//! The uniqueness check and the write happen under one write lock, which is
//! the in-memory equivalent of the unique-index-inside-transaction guarantee
//! a SQL implementation provides.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::value_objects::identifier::AccountIdentifier;
use crate::errors::{DomainError, PermissionError};

use super::trait_::AccountRepository;

/// In-memory account store
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn identifier_conflict(
    accounts: &HashMap<Uuid, Account>,
    candidate: &Account,
) -> Option<AccountIdentifier> {
    candidate.identifiers().into_iter().find(|identifier| {
        accounts
            .values()
            .any(|other| other.id != candidate.id && other.holds_identifier(identifier))
    })
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_identifier(
        &self,
        identifier: &AccountIdentifier,
    ) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|account| account.holds_identifier(identifier))
            .cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&account.id) {
            return Err(DomainError::Validation {
                message: "Account id already exists".to_string(),
            });
        }
        if identifier_conflict(&accounts, &account).is_some() {
            return Err(PermissionError::IdentifierAlreadyInUse.into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(DomainError::NotFound {
                resource: "Account".to_string(),
            });
        }
        // Unique-identifier constraint, evaluated atomically with the write
        if identifier_conflict(&accounts, &account).is_some() {
            return Err(PermissionError::IdentifierAlreadyInUse.into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }
}
