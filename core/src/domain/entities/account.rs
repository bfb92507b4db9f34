//! Account entity referenced by the sensitive-operation gate.
//!
//! The gate never mutates an account directly; changes flow through the
//! profile service's commit path, which pairs every write with the
//! consumption of the verification records that authorized it.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use guard_shared::validation;

use crate::domain::value_objects::identifier::AccountIdentifier;

/// Number of previous password hashes retained for policy checks
pub const MAX_PASSWORD_HISTORY: usize = 10;

/// A social identity linked to an account, keyed by provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialIdentity {
    /// The provider-side subject identifier
    pub subject: String,

    /// Timestamp when the identity was linked
    pub linked_at: DateTime<Utc>,
}

/// Account entity representing a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Display name
    pub name: Option<String>,

    /// Avatar URL
    pub avatar: Option<String>,

    /// Unique username
    pub username: Option<String>,

    /// Verified primary email address
    pub primary_email: Option<String>,

    /// Verified primary phone number (E.164)
    pub primary_phone: Option<String>,

    /// Current password hash
    pub password_hash: Option<String>,

    /// Previous password hashes, most recent first, bounded by
    /// [`MAX_PASSWORD_HISTORY`]
    pub password_history: Vec<String>,

    /// Linked social identities keyed by provider
    pub identities: HashMap<String, SocialIdentity>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new empty account
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: None,
            avatar: None,
            username: None,
            primary_email: None,
            primary_phone: None,
            password_hash: None,
            password_history: Vec::new(),
            identities: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the password hash, pushing the previous one into the bounded
    /// history.
    pub fn set_password_hash(&mut self, hash: String) {
        if let Some(previous) = self.password_hash.replace(hash) {
            self.password_history.insert(0, previous);
            self.password_history.truncate(MAX_PASSWORD_HISTORY);
        }
        self.touch();
    }

    /// Sets the primary email address
    pub fn set_primary_email(&mut self, email: Option<String>) {
        self.primary_email = email;
        self.touch();
    }

    /// Sets the primary phone number
    pub fn set_primary_phone(&mut self, phone: Option<String>) {
        self.primary_phone = phone;
        self.touch();
    }

    /// Sets the username
    pub fn set_username(&mut self, username: Option<String>) {
        self.username = username;
        self.touch();
    }

    /// Sets the display name
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
        self.touch();
    }

    /// Sets the avatar URL
    pub fn set_avatar(&mut self, avatar: Option<String>) {
        self.avatar = avatar;
        self.touch();
    }

    /// Whether an identity for `provider` is linked
    pub fn has_identity(&self, provider: &str) -> bool {
        self.identities.contains_key(provider)
    }

    /// Link a social identity. The caller checks for an existing link first.
    pub fn link_identity(&mut self, provider: String, identity: SocialIdentity) {
        self.identities.insert(provider, identity);
        self.touch();
    }

    /// Remove a linked identity, returning it if it existed
    pub fn unlink_identity(&mut self, provider: &str) -> Option<SocialIdentity> {
        let removed = self.identities.remove(provider);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Whether this account currently holds `candidate`, using the
    /// per-channel matching rules.
    pub fn holds_identifier(&self, candidate: &AccountIdentifier) -> bool {
        match candidate {
            AccountIdentifier::Email { value } => self
                .primary_email
                .as_deref()
                .is_some_and(|own| validation::emails_match(own, value)),
            AccountIdentifier::Phone { value } => {
                self.primary_phone.as_deref() == Some(value.as_str())
            }
            AccountIdentifier::Username { value } => {
                self.username.as_deref() == Some(value.as_str())
            }
            AccountIdentifier::Social { provider, subject } => self
                .identities
                .get(provider)
                .is_some_and(|identity| identity.subject == *subject),
        }
    }

    /// Every unique identifier this account currently holds
    pub fn identifiers(&self) -> Vec<AccountIdentifier> {
        let mut identifiers = Vec::new();
        if let Some(email) = &self.primary_email {
            identifiers.push(AccountIdentifier::email(email.clone()));
        }
        if let Some(phone) = &self.primary_phone {
            identifiers.push(AccountIdentifier::phone(phone.clone()));
        }
        if let Some(username) = &self.username {
            identifiers.push(AccountIdentifier::username(username.clone()));
        }
        for (provider, identity) in &self.identities {
            identifiers.push(AccountIdentifier::social(
                provider.clone(),
                identity.subject.clone(),
            ));
        }
        identifiers
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_is_empty() {
        let account = Account::new();

        assert!(account.primary_email.is_none());
        assert!(account.password_hash.is_none());
        assert!(account.password_history.is_empty());
        assert!(account.identities.is_empty());
    }

    #[test]
    fn test_password_history_is_bounded() {
        let mut account = Account::new();

        // First hash has no predecessor to archive
        account.set_password_hash("hash_0".to_string());
        assert!(account.password_history.is_empty());

        for i in 1..=MAX_PASSWORD_HISTORY + 3 {
            account.set_password_hash(format!("hash_{i}"));
        }

        assert_eq!(account.password_history.len(), MAX_PASSWORD_HISTORY);
        // Most recent predecessor first
        assert_eq!(
            account.password_history[0],
            format!("hash_{}", MAX_PASSWORD_HISTORY + 2)
        );
    }

    #[test]
    fn test_link_and_unlink_identity() {
        let mut account = Account::new();
        assert!(!account.has_identity("github"));

        account.link_identity(
            "github".to_string(),
            SocialIdentity {
                subject: "octocat".to_string(),
                linked_at: Utc::now(),
            },
        );
        assert!(account.has_identity("github"));

        let removed = account.unlink_identity("github");
        assert_eq!(removed.map(|i| i.subject), Some("octocat".to_string()));
        assert!(!account.has_identity("github"));
        assert!(account.unlink_identity("github").is_none());
    }

    #[test]
    fn test_holds_identifier_matching_rules() {
        let mut account = Account::new();
        account.set_primary_email(Some("alice@Example.com".to_string()));
        account.set_username(Some("alice".to_string()));

        assert!(account.holds_identifier(&AccountIdentifier::email("alice@example.COM")));
        assert!(!account.holds_identifier(&AccountIdentifier::email("Alice@example.com")));
        assert!(account.holds_identifier(&AccountIdentifier::username("alice")));
        assert!(!account.holds_identifier(&AccountIdentifier::username("Alice")));
        assert!(!account.holds_identifier(&AccountIdentifier::phone("+61412345678")));
    }

    #[test]
    fn test_identifiers_enumeration() {
        let mut account = Account::new();
        account.set_primary_email(Some("a@example.com".to_string()));
        account.link_identity(
            "github".to_string(),
            SocialIdentity {
                subject: "octocat".to_string(),
                linked_at: Utc::now(),
            },
        );

        let identifiers = account.identifiers();
        assert_eq!(identifiers.len(), 2);
        assert!(identifiers.contains(&AccountIdentifier::email("a@example.com")));
        assert!(identifiers.contains(&AccountIdentifier::social("github", "octocat")));
    }
}
