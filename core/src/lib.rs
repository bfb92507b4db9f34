//! # AccountGuard Core
//!
//! Core business logic and domain layer for the AccountGuard backend.
//! This crate contains the verification-record lifecycle, the sensitive
//! permission gate that guards mutations of security-relevant account
//! attributes, identifier collision checking, and the password policy
//! engine, together with the repository interfaces they depend on.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
