//! Request and result types for gate operations.

use uuid::Uuid;

use crate::domain::value_objects::identifier::AccountIdentifier;
use crate::services::verification::VerificationRecordView;

/// Input for an identity-change authorization.
///
/// The candidate identifier determines both the scope the caller must hold
/// and the verification type expected of the new-identifier record, so a
/// request cannot pair, say, an email candidate with a phone challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityChangeRequest {
    /// Record proving the caller recently re-verified for this operation
    pub current_record_id: Uuid,

    /// Record proving ownership of the value being claimed
    pub new_identifier_record_id: Uuid,

    /// The identifier the caller wants to set
    pub candidate: AccountIdentifier,
}

/// A successful identity-change authorization.
///
/// Carries both resolved proof records and the candidate they authorize.
/// Consuming the records is the commit step's responsibility; until then
/// nothing has been mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedIdentityChange {
    pub current: VerificationRecordView,
    pub new_identifier: VerificationRecordView,
    pub candidate: AccountIdentifier,
}
