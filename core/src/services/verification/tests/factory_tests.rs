//! Unit tests for the verification record factory

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::verification_record::{
    VerificationRecord, VerificationStatus, VerificationType,
};
use crate::domain::value_objects::identifier::AccountIdentifier;
use crate::errors::{DomainError, VerificationError};
use crate::repositories::verification::{
    InMemoryVerificationRecordRepository, VerificationRecordRepository,
};
use crate::services::verification::VerificationRecordFactory;

async fn stored_verified(
    repo: &InMemoryVerificationRecordRepository,
    record_type: VerificationType,
    identifier: Option<AccountIdentifier>,
) -> VerificationRecord {
    let mut record = VerificationRecord::new(Uuid::new_v4(), record_type, identifier);
    record.mark_verified().unwrap();
    repo.create(record.clone()).await.unwrap();
    record
}

#[tokio::test]
async fn test_resolve_success() {
    let repo = Arc::new(InMemoryVerificationRecordRepository::new());
    let factory = VerificationRecordFactory::new(Arc::clone(&repo));

    let record = stored_verified(
        &repo,
        VerificationType::EmailVerificationCode,
        Some(AccountIdentifier::email("a@example.com")),
    )
    .await;

    let view = factory
        .resolve(record.id, VerificationType::EmailVerificationCode)
        .await
        .unwrap();
    assert_eq!(view.id, record.id);
    assert_eq!(view.user_id, record.user_id);
    assert_eq!(view.status, VerificationStatus::Verified);
    assert!(view.is_verified());
}

#[tokio::test]
async fn test_resolve_missing_record() {
    let repo = Arc::new(InMemoryVerificationRecordRepository::new());
    let factory = VerificationRecordFactory::new(repo);

    let result = factory
        .resolve(Uuid::new_v4(), VerificationType::Password)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::RecordNotFound))
    ));
}

#[tokio::test]
async fn test_resolve_type_mismatch_reports_not_found() {
    let repo = Arc::new(InMemoryVerificationRecordRepository::new());
    let factory = VerificationRecordFactory::new(Arc::clone(&repo));

    let record = stored_verified(
        &repo,
        VerificationType::EmailVerificationCode,
        Some(AccountIdentifier::email("a@example.com")),
    )
    .await;

    // An email-code record presented where a phone-code record is expected
    // must not be distinguishable from a missing record
    let result = factory
        .resolve(record.id, VerificationType::PhoneVerificationCode)
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::RecordNotFound))
    ));
}

#[tokio::test]
async fn test_expiry_dominates_status() {
    let repo = Arc::new(InMemoryVerificationRecordRepository::new());
    let factory = VerificationRecordFactory::new(Arc::clone(&repo));

    let mut record = VerificationRecord::new_with_expiration(
        Uuid::new_v4(),
        VerificationType::Password,
        None,
        1,
    );
    record.mark_verified().unwrap();
    // Stored status stays Verified while the clock runs past expires_at
    record.expires_at = chrono::Utc::now() - chrono::Duration::seconds(1);
    repo.create(record.clone()).await.unwrap();

    let result = factory.resolve(record.id, VerificationType::Password).await;
    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::RecordExpired))
    ));

    let result = factory.resolve_any(record.id).await;
    assert!(matches!(
        result,
        Err(DomainError::Verification(VerificationError::RecordExpired))
    ));
}

#[tokio::test]
async fn test_resolve_any_accepts_every_type() {
    let repo = Arc::new(InMemoryVerificationRecordRepository::new());
    let factory = VerificationRecordFactory::new(Arc::clone(&repo));

    let password = stored_verified(&repo, VerificationType::Password, None).await;
    let social = stored_verified(
        &repo,
        VerificationType::Social,
        Some(AccountIdentifier::social("github", "octocat")),
    )
    .await;

    assert!(factory.resolve_any(password.id).await.is_ok());
    assert!(factory.resolve_any(social.id).await.is_ok());
}

#[tokio::test]
async fn test_resolve_is_a_pure_read() {
    let repo = Arc::new(InMemoryVerificationRecordRepository::new());
    let factory = VerificationRecordFactory::new(Arc::clone(&repo));

    let record = stored_verified(&repo, VerificationType::Password, None).await;
    factory
        .resolve(record.id, VerificationType::Password)
        .await
        .unwrap();

    let stored = repo.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(stored, record);
}
