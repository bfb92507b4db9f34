//! Domain-specific error types and error handling.

mod types;

// Re-export all error types and utilities
pub use types::{PermissionError, PolicyError, PolicyRule, VerificationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Business rule violation: {message}")]
    BusinessRule { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Permission(#[from] PermissionError),

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

pub type DomainResult<T> = Result<T, DomainError>;
