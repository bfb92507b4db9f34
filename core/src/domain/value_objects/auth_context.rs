//! Caller identity context handed in by the authentication layer.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scopes granted to a caller for account self-service operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserScope {
    /// Basic profile attributes: name, avatar, username
    Profile,
    /// Primary email address
    Email,
    /// Primary phone number
    Phone,
    /// Linked social identities
    Identities,
}

impl fmt::Display for UserScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Profile => "profile",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Identities => "identities",
        };
        f.write_str(name)
    }
}

/// Authenticated caller identity.
///
/// The gate treats the scope set as opaque and only ever checks membership;
/// which scopes a token carries is the authentication layer's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// The authenticated account id
    pub user_id: Uuid,

    /// Scopes granted to the caller
    pub scopes: HashSet<UserScope>,
}

impl AuthContext {
    /// Creates a new context from a user id and granted scopes
    pub fn new(user_id: Uuid, scopes: impl IntoIterator<Item = UserScope>) -> Self {
        Self {
            user_id,
            scopes: scopes.into_iter().collect(),
        }
    }

    /// Whether the caller holds `scope`
    pub fn has_scope(&self, scope: UserScope) -> bool {
        self.scopes.contains(&scope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_membership() {
        let auth = AuthContext::new(Uuid::new_v4(), [UserScope::Profile, UserScope::Email]);

        assert!(auth.has_scope(UserScope::Profile));
        assert!(auth.has_scope(UserScope::Email));
        assert!(!auth.has_scope(UserScope::Phone));
        assert!(!auth.has_scope(UserScope::Identities));
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(UserScope::Identities.to_string(), "identities");
        assert_eq!(UserScope::Profile.to_string(), "profile");
    }
}
