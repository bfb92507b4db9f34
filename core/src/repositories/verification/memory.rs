//! In-memory implementation of the verification record repository.
//!
//! Backs unit and integration tests and documents the contract a SQL
//! implementation must honor: the conditional status update runs entirely
//! under one write lock, standing in for a transactional
//! `UPDATE ... WHERE status = ?`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::verification_record::{VerificationRecord, VerificationStatus};
use crate::errors::DomainError;

use super::trait_::VerificationRecordRepository;

/// In-memory verification record store
pub struct InMemoryVerificationRecordRepository {
    records: Arc<RwLock<HashMap<Uuid, VerificationRecord>>>,
}

impl InMemoryVerificationRecordRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryVerificationRecordRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationRecordRepository for InMemoryVerificationRecordRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<VerificationRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&id).cloned())
    }

    async fn create(
        &self,
        record: VerificationRecord,
    ) -> Result<VerificationRecord, DomainError> {
        let mut records = self.records.write().await;

        if records.contains_key(&record.id) {
            return Err(DomainError::Validation {
                message: "Verification record id already exists".to_string(),
            });
        }

        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn compare_and_swap_status(
        &self,
        id: Uuid,
        from: VerificationStatus,
        to: VerificationStatus,
    ) -> Result<bool, DomainError> {
        if !from.can_transition_to(to) {
            return Err(DomainError::BusinessRule {
                message: format!("illegal verification status transition {from:?} -> {to:?}"),
            });
        }

        let mut records = self.records.write().await;
        let Some(record) = records.get_mut(&id) else {
            return Ok(false);
        };
        if record.status != from {
            return Ok(false);
        }

        record.status = to;
        Ok(true)
    }
}
