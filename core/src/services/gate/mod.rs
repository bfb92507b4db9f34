//! Sensitive permission gate.
//!
//! Every mutation of a security-sensitive account attribute (password,
//! primary email, primary phone, linked identity) must pass this gate
//! first. The gate is a pure decision function: it checks ownership, scope,
//! freshness, and - for identity changes - new-value consistency and
//! identifier collision, and never applies a change itself.

mod collision;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use collision::IdentifierCollisionChecker;
pub use service::SensitivePermissionGate;
pub use types::{AuthorizedIdentityChange, IdentityChangeRequest};
