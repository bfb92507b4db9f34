//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message (localized by the presentation layer)
    pub message: String,

    /// Additional error details (field errors, violated rules, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an error response with details
    pub fn with_details(
        error: impl Into<String>,
        message: impl Into<String>,
        details: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: Some(details),
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const VERIFICATION_RECORD_NOT_FOUND: &str = "VERIFICATION_RECORD_NOT_FOUND";
    pub const VERIFICATION_RECORD_EXPIRED: &str = "VERIFICATION_RECORD_EXPIRED";
    pub const VERIFICATION_RECORD_NOT_VERIFIED: &str = "VERIFICATION_RECORD_NOT_VERIFIED";
    pub const VERIFICATION_RECORD_CONSUMED: &str = "VERIFICATION_RECORD_CONSUMED";
    pub const VERIFICATION_TOO_MANY_ATTEMPTS: &str = "VERIFICATION_TOO_MANY_ATTEMPTS";
    pub const VERIFICATION_MISMATCH: &str = "VERIFICATION_MISMATCH";
    pub const IDENTIFIER_IN_USE: &str = "IDENTIFIER_IN_USE";
    pub const PASSWORD_POLICY_VIOLATION: &str = "PASSWORD_POLICY_VIOLATION";
}

/// Trait for converting errors to ErrorResponse
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}

/// Result type with ErrorResponse as error
pub type ApiResult<T> = Result<T, ErrorResponse>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_new() {
        let response = ErrorResponse::new(error_codes::NOT_FOUND, "Resource not found");
        assert_eq!(response.error, "NOT_FOUND");
        assert_eq!(response.message, "Resource not found");
        assert!(response.details.is_none());
    }

    #[test]
    fn test_add_detail() {
        let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid input")
            .add_detail("field", "email")
            .add_detail("attempts", 3);

        let details = response.details.expect("details should be set");
        assert_eq!(details["field"], "email");
        assert_eq!(details["attempts"], 3);
    }

    #[test]
    fn test_serialization_skips_empty_details() {
        let response = ErrorResponse::new(error_codes::UNAUTHORIZED, "Missing scope");
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("details"));
    }
}
