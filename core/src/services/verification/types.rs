//! View types produced by the factory.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::verification_record::{
    VerificationRecord, VerificationStatus, VerificationType,
};
use crate::domain::value_objects::identifier::AccountIdentifier;

/// Read-only projection of a stored verification record.
///
/// The gate hands views, never entities, to its callers: consumption goes
/// through the repository's conditional transition, and nothing downstream
/// can touch `identifier` or `record_type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationRecordView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub record_type: VerificationType,
    pub identifier: Option<AccountIdentifier>,
    pub status: VerificationStatus,
    pub expires_at: DateTime<Utc>,
}

impl VerificationRecordView {
    /// Whether the record currently proves a completed challenge
    pub fn is_verified(&self) -> bool {
        self.status == VerificationStatus::Verified && Utc::now() <= self.expires_at
    }
}

impl From<VerificationRecord> for VerificationRecordView {
    fn from(record: VerificationRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            record_type: record.record_type,
            identifier: record.identifier,
            status: record.status,
            expires_at: record.expires_at,
        }
    }
}
