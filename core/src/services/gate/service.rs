//! Sensitive permission gate implementation.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::value_objects::auth_context::{AuthContext, UserScope};
use crate::domain::entities::verification_record::VerificationStatus;
use crate::errors::{DomainError, DomainResult, PermissionError, VerificationError};
use crate::repositories::account::AccountRepository;
use crate::repositories::verification::VerificationRecordRepository;
use crate::services::verification::{VerificationRecordFactory, VerificationRecordView};

use super::collision::IdentifierCollisionChecker;
use super::types::{AuthorizedIdentityChange, IdentityChangeRequest};

/// Authorization gate for mutations of security-sensitive account
/// attributes.
pub struct SensitivePermissionGate<V, A>
where
    V: VerificationRecordRepository,
    A: AccountRepository,
{
    factory: VerificationRecordFactory<V>,
    collision_checker: IdentifierCollisionChecker<A>,
}

impl<V, A> SensitivePermissionGate<V, A>
where
    V: VerificationRecordRepository,
    A: AccountRepository,
{
    /// Create a new gate over the record and account repositories
    pub fn new(records: Arc<V>, accounts: Arc<A>) -> Self {
        Self {
            factory: VerificationRecordFactory::new(records),
            collision_checker: IdentifierCollisionChecker::new(accounts),
        }
    }

    /// Authorize a sensitive operation gated by a record the caller owns.
    ///
    /// Checks, in order:
    /// 1. The record exists and has not expired (lazy expiry)
    /// 2. The record belongs to the caller
    /// 3. The record status is `Verified`
    /// 4. The caller holds `required_scope`
    ///
    /// The record is accepted regardless of its challenge type: any
    /// completed challenge proves possession of the account. This operation
    /// does not consume the record - one record may gate an operation
    /// composed of several checks before the final commit consumes it.
    ///
    /// A record owned by someone else is logged as an ownership mismatch
    /// but surfaced as `RecordNotFound`, so responses cannot be used to
    /// enumerate other users' records.
    pub async fn authorize_owned_record(
        &self,
        auth: &AuthContext,
        record_id: Uuid,
        required_scope: UserScope,
    ) -> DomainResult<VerificationRecordView> {
        let record = self.factory.resolve_any(record_id).await?;
        self.check_owned_verified(auth, &record)?;

        if !auth.has_scope(required_scope) {
            tracing::warn!(
                user_id = %auth.user_id,
                scope = %required_scope,
                event = "scope_check_failed",
                "Caller lacks the scope required for this operation"
            );
            return Err(PermissionError::MissingScope {
                scope: required_scope.to_string(),
            }
            .into());
        }

        Ok(record)
    }

    /// Authorize changing an account identifier to `request.candidate`.
    ///
    /// Checks, in order:
    /// 1. The current-proof record passes [`Self::authorize_owned_record`]
    ///    with the scope required by the candidate's kind
    /// 2. The new-identifier record exists, has the verification type
    ///    matching the candidate's channel, belongs to the caller, and is
    ///    `Verified`
    /// 3. The value the new-identifier record attests matches the candidate
    /// 4. No other account currently holds the candidate
    ///
    /// Returns the authorized change for the commit step; nothing is
    /// consumed or written here. The commit must transition both records to
    /// `Consumed` atomically with the account write.
    pub async fn authorize_identity_change(
        &self,
        auth: &AuthContext,
        request: IdentityChangeRequest,
    ) -> DomainResult<AuthorizedIdentityChange> {
        let IdentityChangeRequest {
            current_record_id,
            new_identifier_record_id,
            candidate,
        } = request;

        let Some(expected_type) = candidate.verification_type() else {
            return Err(DomainError::Validation {
                message: format!(
                    "{:?} identifiers are not changed through a verification challenge",
                    candidate.kind()
                ),
            });
        };

        let current = self
            .authorize_owned_record(auth, current_record_id, candidate.required_scope())
            .await?;

        let new_identifier = self
            .factory
            .resolve(new_identifier_record_id, expected_type)
            .await?;
        self.check_owned_verified(auth, &new_identifier)?;

        let attested = new_identifier
            .identifier
            .as_ref()
            .is_some_and(|verified| verified.matches(&candidate));
        if !attested {
            tracing::warn!(
                record_id = %new_identifier_record_id,
                candidate = %candidate.masked(),
                event = "verification_identifier_mismatch",
                "Verified identifier does not correspond to the requested value"
            );
            return Err(VerificationError::Mismatch.into());
        }

        self.collision_checker
            .ensure_available(&candidate, auth.user_id)
            .await?;

        Ok(AuthorizedIdentityChange {
            current,
            new_identifier,
            candidate,
        })
    }

    /// The collision checker used by this gate
    pub fn collision_checker(&self) -> &IdentifierCollisionChecker<A> {
        &self.collision_checker
    }

    fn check_owned_verified(
        &self,
        auth: &AuthContext,
        record: &VerificationRecordView,
    ) -> DomainResult<()> {
        if record.user_id != auth.user_id {
            tracing::warn!(
                record_id = %record.id,
                caller = %auth.user_id,
                owner = %record.user_id,
                event = "verification_ownership_mismatch",
                "Verification record presented by a non-owning caller"
            );
            return Err(VerificationError::RecordNotFound.into());
        }

        match record.status {
            VerificationStatus::Verified => Ok(()),
            VerificationStatus::Consumed => Err(VerificationError::AlreadyConsumed.into()),
            VerificationStatus::Pending | VerificationStatus::Expired => {
                Err(VerificationError::NotVerified.into())
            }
        }
    }
}
