//! Stateless password policy validator.

use guard_shared::validation;

use crate::domain::entities::account::Account;
use crate::errors::{DomainError, DomainResult, PolicyError, PolicyRule};

use super::policy::{PasswordPolicy, ViolationReporting};

/// Evaluates candidate passwords against a [`PasswordPolicy`].
pub struct PasswordPolicyValidator {
    policy: PasswordPolicy,
}

impl PasswordPolicyValidator {
    /// Create a validator for `policy`
    pub fn new(policy: PasswordPolicy) -> Self {
        Self { policy }
    }

    /// The policy this validator enforces
    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Validate `candidate` against the policy and `account`.
    ///
    /// Rules run in a fixed priority order, so for a given configuration
    /// the first reported violation is deterministic. In first-violation
    /// mode evaluation stops at the first failure; in full-report mode all
    /// rules run and every violation is returned.
    ///
    /// # Errors
    ///
    /// * `PolicyError` - one or more rules violated
    /// * `DomainError::Internal` - a stored history hash could not be read
    pub fn validate(&self, candidate: &str, account: &Account) -> DomainResult<()> {
        let first_only = self.policy.reporting == ViolationReporting::FirstOnly;
        let mut rules = Vec::new();

        let length = candidate.chars().count();
        if length < self.policy.min_length {
            rules.push(PolicyRule::MinimumLength {
                required: self.policy.min_length,
                actual: length,
            });
            if first_only {
                return Err(self.reject(rules));
            }
        }

        let classes = character_classes(candidate);
        if classes < self.policy.min_character_classes {
            rules.push(PolicyRule::CharacterClasses {
                required: self.policy.min_character_classes,
                actual: classes,
            });
            if first_only {
                return Err(self.reject(rules));
            }
        }

        if self.policy.reject_user_identifiers && contains_user_identifier(candidate, account) {
            rules.push(PolicyRule::ContainsUserIdentifier);
            if first_only {
                return Err(self.reject(rules));
            }
        }

        if self.found_in_history(candidate, account)? {
            rules.push(PolicyRule::FoundInHistory);
            if first_only {
                return Err(self.reject(rules));
            }
        }

        if rules.is_empty() {
            Ok(())
        } else {
            Err(self.reject(rules))
        }
    }

    fn reject(&self, rules: Vec<PolicyRule>) -> DomainError {
        tracing::debug!(
            rules = rules.len(),
            event = "password_policy_rejected",
            "Candidate password violates the policy"
        );
        PolicyError::new(rules).into()
    }

    /// Whether the candidate matches the current password or a retained
    /// history entry.
    fn found_in_history(&self, candidate: &str, account: &Account) -> DomainResult<bool> {
        if self.policy.history_size == 0 {
            return Ok(false);
        }

        let hashes = account
            .password_hash
            .iter()
            .chain(account.password_history.iter().take(self.policy.history_size));

        for hash in hashes {
            let matched = bcrypt::verify(candidate, hash).map_err(|e| DomainError::Internal {
                message: format!("Failed to verify password history entry: {e}"),
            })?;
            if matched {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Count the distinct character classes present in `candidate`
fn character_classes(candidate: &str) -> usize {
    let mut lower = false;
    let mut upper = false;
    let mut digit = false;
    let mut symbol = false;

    for c in candidate.chars() {
        if c.is_lowercase() {
            lower = true;
        } else if c.is_uppercase() {
            upper = true;
        } else if c.is_ascii_digit() {
            digit = true;
        } else {
            symbol = true;
        }
    }

    [lower, upper, digit, symbol].into_iter().filter(|present| *present).count()
}

/// Whether the candidate contains the account's username, email local part,
/// or phone number, compared case-insensitively.
fn contains_user_identifier(candidate: &str, account: &Account) -> bool {
    let lowered = candidate.to_lowercase();

    let mut tokens: Vec<String> = Vec::new();
    if let Some(username) = &account.username {
        tokens.push(username.to_lowercase());
    }
    if let Some(local) = account
        .primary_email
        .as_deref()
        .and_then(validation::email_local_part)
    {
        tokens.push(local.to_lowercase());
    }
    if let Some(phone) = &account.primary_phone {
        tokens.push(phone.trim_start_matches('+').to_string());
    }

    tokens
        .iter()
        .any(|token| !token.is_empty() && lowered.contains(token.as_str()))
}
