//! Account repository trait defining the persistence interface.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::value_objects::identifier::AccountIdentifier;
use crate::errors::DomainError;

/// Repository contract for account persistence.
///
/// The storage layer owns identifier uniqueness: `create` and `update` run
/// their uniqueness check and the write inside one transactional scope, so
/// two concurrent writers claiming the same identifier cannot both commit.
/// The collision checker consults `find_by_identifier` for an early,
/// user-friendly rejection before that point.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(account))` - Account found
    /// * `Ok(None)` - No account with the given id
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find the account currently holding `identifier`, using the
    /// per-channel matching rules (email domains compare
    /// case-insensitively).
    async fn find_by_identifier(
        &self,
        identifier: &AccountIdentifier,
    ) -> Result<Option<Account>, DomainError>;

    /// Persist a new account
    ///
    /// # Returns
    /// * `Ok(account)` - The created account
    /// * `Err(DomainError)` - Creation failed (duplicate id or identifier)
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Persist an updated account.
    ///
    /// Fails with [`PermissionError::IdentifierAlreadyInUse`] when another
    /// account already holds one of the written identifiers; a losing
    /// concurrent writer fails observably rather than overwriting.
    ///
    /// [`PermissionError::IdentifierAlreadyInUse`]:
    /// crate::errors::PermissionError::IdentifierAlreadyInUse
    async fn update(&self, account: Account) -> Result<Account, DomainError>;
}
