//! Verification record repository trait defining the persistence interface.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::verification_record::{VerificationRecord, VerificationStatus};
use crate::errors::DomainError;

/// Repository contract for verification record persistence.
///
/// Records are written by the out-of-band challenge flows and are read-only
/// to the gate except for the conditional status transition used to consume
/// them. Expired and consumed records are retained; garbage collection is an
/// external housekeeping concern.
#[async_trait]
pub trait VerificationRecordRepository: Send + Sync {
    /// Find a record by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(record))` - Record found
    /// * `Ok(None)` - No record with the given id
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRecord>, DomainError>;

    /// Persist a newly created record
    ///
    /// # Returns
    /// * `Ok(record)` - The stored record
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate id)
    async fn create(
        &self,
        record: VerificationRecord,
    ) -> Result<VerificationRecord, DomainError>;

    /// Conditionally transition the record's status from `from` to `to`.
    ///
    /// The update must be keyed on the stored status (optimistic
    /// versioning): of two writers racing on the same record, exactly one
    /// observes `true`. Implementations must also reject transitions the
    /// lifecycle does not permit.
    ///
    /// # Returns
    /// * `Ok(true)` - The transition was applied
    /// * `Ok(false)` - No record with `id`, or its status differed from
    ///   `from`; the caller maps this to the appropriate conflict error
    /// * `Err(DomainError)` - Illegal transition or storage error
    async fn compare_and_swap_status(
        &self,
        id: Uuid,
        from: VerificationStatus,
        to: VerificationStatus,
    ) -> Result<bool, DomainError>;
}
