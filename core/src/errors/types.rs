//! Error type definitions for verification and gating operations.
//!
//! Messages are English-only; the presentation layer maps the error codes
//! carried by [`ErrorResponse`] conversions to localized copy.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use guard_shared::errors::{error_codes, ErrorResponse};

/// Verification record errors.
///
/// `RecordNotFound` deliberately covers three distinct situations - record
/// missing, wrong record type, wrong owner - which are logged separately but
/// share one public outcome so responses cannot be used to probe for record
/// existence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Verification record not found")]
    RecordNotFound,

    #[error("Verification record expired")]
    RecordExpired,

    #[error("Verification record is not verified")]
    NotVerified,

    #[error("Verification record already consumed")]
    AlreadyConsumed,

    #[error("Maximum verification attempts exceeded")]
    MaxAttemptsExceeded,

    #[error("Verified identifier does not match the requested value")]
    Mismatch,
}

/// Authorization errors raised by the sensitive permission gate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    #[error("Missing required scope: {scope}")]
    MissingScope { scope: String },

    #[error("Identifier is already in use by another account")]
    IdentifierAlreadyInUse,
}

/// A single violated password policy rule
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum PolicyRule {
    #[error("Password must be at least {required} characters")]
    MinimumLength { required: usize, actual: usize },

    #[error("Password must use at least {required} character classes")]
    CharacterClasses { required: usize, actual: usize },

    #[error("Password must not contain the account's own identifiers")]
    ContainsUserIdentifier,

    #[error("Password was used recently")]
    FoundInHistory,
}

/// Password policy failure.
///
/// `rules` is ordered by rule priority and never empty. In first-violation
/// reporting mode it contains exactly one entry; in full-report mode, every
/// violated rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyError {
    pub rules: Vec<PolicyRule>,
}

impl PolicyError {
    pub(crate) fn new(rules: Vec<PolicyRule>) -> Self {
        debug_assert!(!rules.is_empty());
        Self { rules }
    }

    /// The highest-priority violated rule
    pub fn first_rule(&self) -> Option<&PolicyRule> {
        self.rules.first()
    }
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rules.as_slice() {
            [] => write!(f, "Password policy violation"),
            [rule] => write!(f, "Password policy violation: {rule}"),
            [rule, rest @ ..] => {
                write!(f, "Password policy violation: {rule} (+{} more)", rest.len())
            }
        }
    }
}

impl std::error::Error for PolicyError {}

/// Convert VerificationError to ErrorResponse
impl From<VerificationError> for ErrorResponse {
    fn from(err: VerificationError) -> Self {
        let error_code = match &err {
            VerificationError::RecordNotFound => error_codes::VERIFICATION_RECORD_NOT_FOUND,
            VerificationError::RecordExpired => error_codes::VERIFICATION_RECORD_EXPIRED,
            VerificationError::NotVerified => error_codes::VERIFICATION_RECORD_NOT_VERIFIED,
            VerificationError::AlreadyConsumed => error_codes::VERIFICATION_RECORD_CONSUMED,
            VerificationError::MaxAttemptsExceeded => {
                error_codes::VERIFICATION_TOO_MANY_ATTEMPTS
            }
            VerificationError::Mismatch => error_codes::VERIFICATION_MISMATCH,
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert PermissionError to ErrorResponse
impl From<PermissionError> for ErrorResponse {
    fn from(err: PermissionError) -> Self {
        let error_code = match &err {
            PermissionError::MissingScope { .. } => error_codes::UNAUTHORIZED,
            PermissionError::IdentifierAlreadyInUse => error_codes::IDENTIFIER_IN_USE,
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert PolicyError to ErrorResponse, carrying the violated rules as
/// structured details
impl From<PolicyError> for ErrorResponse {
    fn from(err: PolicyError) -> Self {
        ErrorResponse::new(error_codes::PASSWORD_POLICY_VIOLATION, err.to_string())
            .add_detail("rules", &err.rules)
    }
}

/// Convert DomainError to ErrorResponse
impl From<super::DomainError> for ErrorResponse {
    fn from(err: super::DomainError) -> Self {
        use super::DomainError;

        match err {
            DomainError::Validation { .. } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, err.to_string())
            }
            DomainError::BusinessRule { .. } => {
                ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string())
            }
            DomainError::NotFound { .. } => {
                ErrorResponse::new(error_codes::NOT_FOUND, err.to_string())
            }
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, err.to_string())
            }
            DomainError::Verification(inner) => inner.into(),
            DomainError::Permission(inner) => inner.into(),
            DomainError::Policy(inner) => inner.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainError;

    #[test]
    fn test_verification_error_codes() {
        let response: ErrorResponse = VerificationError::AlreadyConsumed.into();
        assert_eq!(response.error, "VERIFICATION_RECORD_CONSUMED");
        assert!(response.message.contains("already consumed"));

        let response: ErrorResponse = VerificationError::Mismatch.into();
        assert_eq!(response.error, "VERIFICATION_MISMATCH");
    }

    #[test]
    fn test_permission_error_codes() {
        let response: ErrorResponse = PermissionError::MissingScope {
            scope: "email".to_string(),
        }
        .into();
        assert_eq!(response.error, "UNAUTHORIZED");
        assert!(response.message.contains("email"));
    }

    #[test]
    fn test_policy_error_carries_rules() {
        let err = PolicyError::new(vec![
            PolicyRule::MinimumLength { required: 8, actual: 5 },
            PolicyRule::FoundInHistory,
        ]);
        assert_eq!(
            err.first_rule(),
            Some(&PolicyRule::MinimumLength { required: 8, actual: 5 })
        );
        assert!(err.to_string().contains("+1 more"));

        let response: ErrorResponse = err.into();
        assert_eq!(response.error, "PASSWORD_POLICY_VIOLATION");
        let details = response.details.expect("rules should be attached");
        assert_eq!(details["rules"].as_array().map(|r| r.len()), Some(2));
    }

    #[test]
    fn test_domain_error_bridges_to_specific_codes() {
        let err: DomainError = VerificationError::RecordExpired.into();
        let response: ErrorResponse = err.into();
        assert_eq!(response.error, "VERIFICATION_RECORD_EXPIRED");

        let err = DomainError::NotFound {
            resource: "account".to_string(),
        };
        let response: ErrorResponse = err.into();
        assert_eq!(response.error, "NOT_FOUND");
    }

    #[test]
    fn test_policy_rule_serialization() {
        let rule = PolicyRule::MinimumLength { required: 8, actual: 3 };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["rule"], "minimum_length");
        assert_eq!(json["required"], 8);
    }
}
