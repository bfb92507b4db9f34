//! Verification record entity: a short-lived proof that a user completed an
//! identity challenge (one-time code, password re-entry, or social provider
//! confirmation).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::identifier::AccountIdentifier;
use crate::errors::{DomainError, VerificationError};

/// Maximum number of challenge attempts allowed for code-based records
pub const MAX_ATTEMPTS: i32 = 3;

/// Default expiration for code-based records (minutes)
pub const DEFAULT_CODE_EXPIRATION_MINUTES: i64 = 10;

/// Default expiration for password re-entry records (minutes)
pub const DEFAULT_PASSWORD_EXPIRATION_MINUTES: i64 = 30;

/// Default expiration for social confirmation records (minutes)
pub const DEFAULT_SOCIAL_EXPIRATION_MINUTES: i64 = 15;

/// The kind of challenge a verification record attests to.
///
/// The set is closed on purpose: every dispatch over it is an exhaustive
/// match, so adding a challenge type fails to compile until each site
/// handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationType {
    /// Password re-entry by the account owner
    Password,
    /// One-time code delivered to an email address
    EmailVerificationCode,
    /// One-time code delivered to a phone number
    PhoneVerificationCode,
    /// Confirmation via a linked social provider
    Social,
}

impl VerificationType {
    /// Default time-to-live for records of this type
    pub fn default_expiration_minutes(&self) -> i64 {
        match self {
            Self::Password => DEFAULT_PASSWORD_EXPIRATION_MINUTES,
            Self::EmailVerificationCode | Self::PhoneVerificationCode => {
                DEFAULT_CODE_EXPIRATION_MINUTES
            }
            Self::Social => DEFAULT_SOCIAL_EXPIRATION_MINUTES,
        }
    }

    /// Whether records of this type track a bounded attempt counter
    pub fn is_code_based(&self) -> bool {
        matches!(self, Self::EmailVerificationCode | Self::PhoneVerificationCode)
    }
}

/// Lifecycle state of a verification record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Challenge issued, not yet completed
    Pending,
    /// Challenge completed; the record may gate one mutation
    Verified,
    /// Time-to-live elapsed before the record was consumed
    Expired,
    /// The record gated a committed mutation; terminal
    Consumed,
}

impl VerificationStatus {
    /// Whether a record may move from `self` to `next`.
    ///
    /// Transitions are monotonic and one-directional; nothing leaves
    /// `Consumed` or `Expired`.
    pub fn can_transition_to(&self, next: VerificationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Verified)
                | (Self::Pending, Self::Expired)
                | (Self::Verified, Self::Consumed)
                | (Self::Verified, Self::Expired)
        )
    }

    /// Whether this status permits no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Expired | Self::Consumed)
    }
}

/// Verification record entity.
///
/// Records are created by the out-of-band challenge flows. `user_id`,
/// `record_type` and `identifier` never change after creation; the only
/// mutation this core performs on a stored record is the conditional
/// status transition that consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// The account the challenge was issued for
    pub user_id: Uuid,

    /// The kind of challenge this record attests to
    pub record_type: VerificationType,

    /// The channel/value the challenge was issued against (the email or
    /// phone a code was sent to, or the social provider subject). Absent
    /// for password re-entry.
    pub identifier: Option<AccountIdentifier>,

    /// Current lifecycle state
    pub status: VerificationStatus,

    /// Number of challenge attempts made (code-based types)
    pub attempt_count: i32,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the record expires; fixed at creation
    pub expires_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Creates a new pending record with the type's default time-to-live
    pub fn new(
        user_id: Uuid,
        record_type: VerificationType,
        identifier: Option<AccountIdentifier>,
    ) -> Self {
        Self::new_with_expiration(
            user_id,
            record_type,
            identifier,
            record_type.default_expiration_minutes(),
        )
    }

    /// Creates a new pending record with a custom time-to-live
    pub fn new_with_expiration(
        user_id: Uuid,
        record_type: VerificationType,
        identifier: Option<AccountIdentifier>,
        expiration_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            record_type,
            identifier,
            status: VerificationStatus::Pending,
            attempt_count: 0,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
        }
    }

    /// Checks whether the record's time-to-live has elapsed.
    ///
    /// Expiry is evaluated lazily at read time; the stored status may still
    /// say `Verified` for a record that is no longer usable.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Whether the record currently proves a completed challenge
    pub fn is_verified(&self) -> bool {
        self.status == VerificationStatus::Verified && !self.is_expired()
    }

    /// Move the record to `next`, enforcing the monotonic transition rules.
    pub fn transition(&mut self, next: VerificationStatus) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::BusinessRule {
                message: format!(
                    "illegal verification status transition {:?} -> {:?}",
                    self.status, next
                ),
            });
        }
        self.status = next;
        Ok(())
    }

    /// Mark the challenge as completed.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - the record is now `Verified`
    /// * `Err` - the record expired, or the transition is illegal
    pub fn mark_verified(&mut self) -> Result<(), DomainError> {
        if self.is_expired() {
            return Err(VerificationError::RecordExpired.into());
        }
        self.transition(VerificationStatus::Verified)
    }

    /// Count a challenge attempt against the bounded retry budget.
    ///
    /// # Returns
    ///
    /// * `Ok(remaining)` - attempts left after this one
    /// * `Err` - the budget was already exhausted
    pub fn register_attempt(&mut self) -> Result<i32, DomainError> {
        if self.attempt_count >= MAX_ATTEMPTS {
            return Err(VerificationError::MaxAttemptsExceeded.into());
        }
        self.attempt_count += 1;
        Ok(self.remaining_attempts())
    }

    /// Gets the number of remaining challenge attempts
    pub fn remaining_attempts(&self) -> i32 {
        (MAX_ATTEMPTS - self.attempt_count).max(0)
    }

    /// Time remaining until expiration, or zero if already expired
    pub fn time_until_expiration(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_identifier() -> AccountIdentifier {
        AccountIdentifier::Email { value: "a@example.com".to_string() }
    }

    #[test]
    fn test_new_record_defaults() {
        let user_id = Uuid::new_v4();
        let record = VerificationRecord::new(
            user_id,
            VerificationType::EmailVerificationCode,
            Some(email_identifier()),
        );

        assert_eq!(record.user_id, user_id);
        assert_eq!(record.status, VerificationStatus::Pending);
        assert_eq!(record.attempt_count, 0);
        assert!(!record.is_expired());
        assert!(!record.is_verified());
        assert_eq!(
            record.expires_at,
            record.created_at + Duration::minutes(DEFAULT_CODE_EXPIRATION_MINUTES)
        );
    }

    #[test]
    fn test_expiration_per_type() {
        assert_eq!(
            VerificationType::Password.default_expiration_minutes(),
            DEFAULT_PASSWORD_EXPIRATION_MINUTES
        );
        assert_eq!(
            VerificationType::PhoneVerificationCode.default_expiration_minutes(),
            DEFAULT_CODE_EXPIRATION_MINUTES
        );
        assert_eq!(
            VerificationType::Social.default_expiration_minutes(),
            DEFAULT_SOCIAL_EXPIRATION_MINUTES
        );
    }

    #[test]
    fn test_status_transitions_are_monotonic() {
        use VerificationStatus::*;

        assert!(Pending.can_transition_to(Verified));
        assert!(Pending.can_transition_to(Expired));
        assert!(Verified.can_transition_to(Consumed));
        assert!(Verified.can_transition_to(Expired));

        assert!(!Verified.can_transition_to(Pending));
        assert!(!Consumed.can_transition_to(Verified));
        assert!(!Consumed.can_transition_to(Pending));
        assert!(!Expired.can_transition_to(Verified));
        assert!(!Expired.can_transition_to(Consumed));
    }

    #[test]
    fn test_transition_rejects_illegal_move() {
        let mut record = VerificationRecord::new(
            Uuid::new_v4(),
            VerificationType::Password,
            None,
        );
        record.mark_verified().unwrap();
        record.transition(VerificationStatus::Consumed).unwrap();

        let result = record.transition(VerificationStatus::Verified);
        assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
        assert_eq!(record.status, VerificationStatus::Consumed);
    }

    #[test]
    fn test_mark_verified_rejects_expired() {
        let mut record = VerificationRecord::new_with_expiration(
            Uuid::new_v4(),
            VerificationType::EmailVerificationCode,
            Some(email_identifier()),
            -1,
        );

        assert!(record.is_expired());
        let result = record.mark_verified();
        assert!(matches!(
            result,
            Err(DomainError::Verification(VerificationError::RecordExpired))
        ));
        assert_eq!(record.status, VerificationStatus::Pending);
    }

    #[test]
    fn test_attempt_budget() {
        let mut record = VerificationRecord::new(
            Uuid::new_v4(),
            VerificationType::PhoneVerificationCode,
            Some(AccountIdentifier::Phone { value: "+61412345678".to_string() }),
        );

        assert_eq!(record.remaining_attempts(), MAX_ATTEMPTS);
        for expected_remaining in (0..MAX_ATTEMPTS).rev() {
            assert_eq!(record.register_attempt().unwrap(), expected_remaining);
        }

        let result = record.register_attempt();
        assert!(matches!(
            result,
            Err(DomainError::Verification(VerificationError::MaxAttemptsExceeded))
        ));
        assert_eq!(record.attempt_count, MAX_ATTEMPTS);
    }

    #[test]
    fn test_time_until_expiration() {
        let record = VerificationRecord::new(
            Uuid::new_v4(),
            VerificationType::EmailVerificationCode,
            Some(email_identifier()),
        );

        let remaining = record.time_until_expiration();
        assert!(remaining <= Duration::minutes(DEFAULT_CODE_EXPIRATION_MINUTES));
        assert!(remaining > Duration::minutes(DEFAULT_CODE_EXPIRATION_MINUTES - 1));

        let expired = VerificationRecord::new_with_expiration(
            Uuid::new_v4(),
            VerificationType::EmailVerificationCode,
            Some(email_identifier()),
            -1,
        );
        assert_eq!(expired.time_until_expiration(), Duration::zero());
    }

    #[test]
    fn test_serialization_round_trip() {
        let record = VerificationRecord::new(
            Uuid::new_v4(),
            VerificationType::Social,
            Some(AccountIdentifier::Social {
                provider: "github".to_string(),
                subject: "octocat".to_string(),
            }),
        );

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: VerificationRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
