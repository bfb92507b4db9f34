//! Identifier collision checking.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::value_objects::identifier::AccountIdentifier;
use crate::errors::{DomainResult, PermissionError};
use crate::repositories::account::AccountRepository;

/// Checks whether a candidate identifier is already claimed by another
/// account.
pub struct IdentifierCollisionChecker<A: AccountRepository> {
    accounts: Arc<A>,
}

impl<A: AccountRepository> IdentifierCollisionChecker<A> {
    /// Create a new checker over an account repository
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }

    /// Whether any account other than `exclude_user_id` currently holds
    /// `candidate`.
    pub async fn is_taken(
        &self,
        candidate: &AccountIdentifier,
        exclude_user_id: Uuid,
    ) -> DomainResult<bool> {
        Ok(self
            .accounts
            .find_by_identifier(candidate)
            .await?
            .is_some_and(|owner| owner.id != exclude_user_id))
    }

    /// Reject early when `candidate` is claimed elsewhere.
    ///
    /// This is the user-friendly rejection; the hard guarantee against two
    /// racing writers is the uniqueness check the store repeats inside the
    /// committing transaction.
    pub async fn ensure_available(
        &self,
        candidate: &AccountIdentifier,
        exclude_user_id: Uuid,
    ) -> DomainResult<()> {
        if self.is_taken(candidate, exclude_user_id).await? {
            tracing::warn!(
                identifier = %candidate.masked(),
                kind = ?candidate.kind(),
                event = "identifier_collision",
                "Candidate identifier is already claimed by another account"
            );
            return Err(PermissionError::IdentifierAlreadyInUse.into());
        }
        Ok(())
    }
}
