//! Account identifier value object: the unique handles an account can be
//! reached or claimed by.

use serde::{Deserialize, Serialize};

use guard_shared::validation;

use crate::domain::entities::verification_record::VerificationType;
use crate::domain::value_objects::auth_context::UserScope;

/// Discriminant of an [`AccountIdentifier`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    Email,
    Phone,
    Username,
    Social,
}

/// A unique handle claiming or reaching an account.
///
/// Matching rules are per channel: email local parts compare exactly while
/// domains compare case-insensitively; phone, username, and social
/// provider/subject pairs compare exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccountIdentifier {
    Email { value: String },
    Phone { value: String },
    Username { value: String },
    Social { provider: String, subject: String },
}

impl AccountIdentifier {
    /// Convenience constructor for an email identifier
    pub fn email(value: impl Into<String>) -> Self {
        Self::Email { value: value.into() }
    }

    /// Convenience constructor for a phone identifier
    pub fn phone(value: impl Into<String>) -> Self {
        Self::Phone { value: value.into() }
    }

    /// Convenience constructor for a username identifier
    pub fn username(value: impl Into<String>) -> Self {
        Self::Username { value: value.into() }
    }

    /// Convenience constructor for a social identity identifier
    pub fn social(provider: impl Into<String>, subject: impl Into<String>) -> Self {
        Self::Social {
            provider: provider.into(),
            subject: subject.into(),
        }
    }

    pub fn kind(&self) -> IdentifierKind {
        match self {
            Self::Email { .. } => IdentifierKind::Email,
            Self::Phone { .. } => IdentifierKind::Phone,
            Self::Username { .. } => IdentifierKind::Username,
            Self::Social { .. } => IdentifierKind::Social,
        }
    }

    /// Whether `other` names the same identifier, using the per-channel
    /// comparison rules. Identifiers of different kinds never match.
    pub fn matches(&self, other: &AccountIdentifier) -> bool {
        match (self, other) {
            (Self::Email { value: a }, Self::Email { value: b }) => {
                validation::emails_match(a, b)
            }
            (Self::Phone { value: a }, Self::Phone { value: b }) => a == b,
            (Self::Username { value: a }, Self::Username { value: b }) => a == b,
            (
                Self::Social { provider: pa, subject: sa },
                Self::Social { provider: pb, subject: sb },
            ) => pa == pb && sa == sb,
            _ => false,
        }
    }

    /// The scope a caller must hold to change this class of identifier
    pub fn required_scope(&self) -> UserScope {
        match self.kind() {
            IdentifierKind::Email => UserScope::Email,
            IdentifierKind::Phone => UserScope::Phone,
            IdentifierKind::Username => UserScope::Profile,
            IdentifierKind::Social => UserScope::Identities,
        }
    }

    /// The verification type that attests a value on this channel.
    ///
    /// `None` for usernames: a username is not a challenge channel, so a
    /// username change carries no new-identifier verification record.
    pub fn verification_type(&self) -> Option<VerificationType> {
        match self.kind() {
            IdentifierKind::Email => Some(VerificationType::EmailVerificationCode),
            IdentifierKind::Phone => Some(VerificationType::PhoneVerificationCode),
            IdentifierKind::Social => Some(VerificationType::Social),
            IdentifierKind::Username => None,
        }
    }

    /// Whether the carried value is well-formed for its channel
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Email { value } => validation::is_valid_email(value),
            Self::Phone { value } => validation::is_valid_phone(value),
            Self::Username { value } => validation::is_valid_username(value),
            Self::Social { provider, subject } => !provider.is_empty() && !subject.is_empty(),
        }
    }

    /// A redacted rendering safe for logs.
    pub fn masked(&self) -> String {
        match self {
            Self::Email { value } => match value.rsplit_once('@') {
                Some((local, domain)) => {
                    let head = local.chars().next().map(String::from).unwrap_or_default();
                    format!("{head}***@{domain}")
                }
                None => "***".to_string(),
            },
            Self::Phone { value } => {
                let digits: String = value
                    .chars()
                    .rev()
                    .take(3)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("***{digits}")
            }
            Self::Username { value } => {
                let head: String = value.chars().take(2).collect();
                format!("{head}***")
            }
            Self::Social { provider, .. } => format!("{provider}:***"),
        }
    }
}
