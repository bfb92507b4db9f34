//! Typed resolution of stored verification records.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::verification_record::VerificationType;
use crate::errors::{DomainResult, VerificationError};
use crate::repositories::verification::VerificationRecordRepository;

use super::types::VerificationRecordView;

/// Builds validated record views from stored records.
pub struct VerificationRecordFactory<R: VerificationRecordRepository> {
    records: Arc<R>,
}

impl<R: VerificationRecordRepository> VerificationRecordFactory<R> {
    /// Create a new factory over a record repository
    pub fn new(records: Arc<R>) -> Self {
        Self { records }
    }

    /// Resolve `id` as a record of `expected_type`.
    ///
    /// A stored record of a different type is reported as not found: type
    /// confusion must not leak record existence to the caller. Expiry is
    /// evaluated against the clock on every read, regardless of the stored
    /// status.
    ///
    /// # Errors
    ///
    /// * `VerificationError::RecordNotFound` - no record, or type mismatch
    /// * `VerificationError::RecordExpired` - time-to-live elapsed
    pub async fn resolve(
        &self,
        id: Uuid,
        expected_type: VerificationType,
    ) -> DomainResult<VerificationRecordView> {
        let Some(record) = self.records.find_by_id(id).await? else {
            return Err(VerificationError::RecordNotFound.into());
        };

        if record.record_type != expected_type {
            tracing::warn!(
                record_id = %id,
                expected = ?expected_type,
                actual = ?record.record_type,
                event = "verification_type_mismatch",
                "Verification record requested with the wrong type"
            );
            return Err(VerificationError::RecordNotFound.into());
        }

        if record.is_expired() {
            return Err(VerificationError::RecordExpired.into());
        }

        Ok(record.into())
    }

    /// Resolve `id` accepting any record type.
    ///
    /// Used for the current-proof record of a sensitive operation: any
    /// completed challenge (password re-entry, code, social confirmation)
    /// proves the caller's possession of the account.
    pub async fn resolve_any(&self, id: Uuid) -> DomainResult<VerificationRecordView> {
        let Some(record) = self.records.find_by_id(id).await? else {
            return Err(VerificationError::RecordNotFound.into());
        };

        if record.is_expired() {
            return Err(VerificationError::RecordExpired.into());
        }

        Ok(record.into())
    }
}
