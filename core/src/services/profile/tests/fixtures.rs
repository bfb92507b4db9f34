//! Shared fixtures for profile service tests

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::domain::entities::verification_record::{VerificationRecord, VerificationType};
use crate::domain::value_objects::identifier::AccountIdentifier;
use crate::repositories::account::{AccountRepository, InMemoryAccountRepository};
use crate::repositories::verification::{
    InMemoryVerificationRecordRepository, VerificationRecordRepository,
};
use crate::services::profile::{ProfileService, ProfileServiceConfig};

// Low bcrypt cost keeps hashing fast in tests
pub const TEST_BCRYPT_COST: u32 = 4;

pub type TestProfileService =
    ProfileService<InMemoryVerificationRecordRepository, InMemoryAccountRepository>;

pub struct TestEnv {
    pub records: Arc<InMemoryVerificationRecordRepository>,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub service: Arc<TestProfileService>,
}

pub fn test_env() -> TestEnv {
    let records = Arc::new(InMemoryVerificationRecordRepository::new());
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let config = ProfileServiceConfig {
        bcrypt_cost: TEST_BCRYPT_COST,
        ..ProfileServiceConfig::default()
    };
    let service = Arc::new(ProfileService::new(
        Arc::clone(&records),
        Arc::clone(&accounts),
        config,
    ));
    TestEnv {
        records,
        accounts,
        service,
    }
}

pub async fn new_account(env: &TestEnv) -> Account {
    env.accounts.create(Account::new()).await.unwrap()
}

pub async fn verified_record(
    env: &TestEnv,
    user_id: Uuid,
    record_type: VerificationType,
    identifier: Option<AccountIdentifier>,
) -> VerificationRecord {
    let mut record = VerificationRecord::new(user_id, record_type, identifier);
    record.mark_verified().unwrap();
    env.records.create(record.clone()).await.unwrap();
    record
}

/// A verified password re-entry record, the usual current-proof
pub async fn proof_record(env: &TestEnv, user_id: Uuid) -> VerificationRecord {
    verified_record(env, user_id, VerificationType::Password, None).await
}
