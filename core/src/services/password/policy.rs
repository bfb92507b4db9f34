//! Password policy configuration.

use serde::{Deserialize, Serialize};

use crate::domain::entities::account::MAX_PASSWORD_HISTORY;

/// How policy violations are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationReporting {
    /// Stop at the first violated rule (one actionable message)
    FirstOnly,
    /// Collect every violated rule
    All,
}

impl Default for ViolationReporting {
    fn default() -> Self {
        Self::FirstOnly
    }
}

/// Configurable password policy.
///
/// Rules are evaluated in a fixed priority order: minimum length, character
/// classes, the account's own identifiers, password history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordPolicy {
    /// Minimum password length
    pub min_length: usize,

    /// Number of distinct character classes (lowercase, uppercase, digit,
    /// symbol) the password must span
    pub min_character_classes: usize,

    /// Reject passwords containing the account's username, email local
    /// part, or phone number
    pub reject_user_identifiers: bool,

    /// How many password history entries a candidate is tested against;
    /// effectively capped by the entity-side retention bound
    pub history_size: usize,

    /// Violation reporting mode
    #[serde(default)]
    pub reporting: ViolationReporting,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            min_character_classes: 2,
            reject_user_identifiers: true,
            history_size: MAX_PASSWORD_HISTORY,
            reporting: ViolationReporting::FirstOnly,
        }
    }
}
