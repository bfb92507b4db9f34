//! Request and view types for profile operations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::account::{Account, SocialIdentity};
use crate::domain::value_objects::auth_context::{AuthContext, UserScope};

/// Basic profile update: fields left as `None` stay unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub username: Option<String>,
}

/// Set or replace the account password
#[derive(Debug, Clone, Deserialize)]
pub struct SetPasswordRequest {
    pub password: String,
    pub verification_record_id: Uuid,
}

/// Change the primary email address
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeEmailRequest {
    pub email: String,
    pub verification_record_id: Uuid,
    pub new_identifier_verification_record_id: Uuid,
}

/// Change the primary phone number
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePhoneRequest {
    pub phone: String,
    pub verification_record_id: Uuid,
    pub new_identifier_verification_record_id: Uuid,
}

/// Link a social identity attested by a social verification record
#[derive(Debug, Clone, Deserialize)]
pub struct LinkIdentityRequest {
    pub verification_record_id: Uuid,
    pub new_identifier_verification_record_id: Uuid,
}

/// Unlink the social identity for `target`
#[derive(Debug, Clone, Deserialize)]
pub struct UnlinkIdentityRequest {
    pub target: String,
    pub verification_record_id: Uuid,
}

/// Scope-filtered projection of an account.
///
/// Fields the caller's scopes do not cover are omitted entirely rather than
/// rendered as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identities: Option<HashMap<String, SocialIdentity>>,
}

impl ProfileView {
    /// Project `account` through the caller's scopes
    pub fn scoped(account: &Account, auth: &AuthContext) -> Self {
        let mut view = Self::default();

        if auth.has_scope(UserScope::Profile) {
            view.name = account.name.clone();
            view.avatar = account.avatar.clone();
            view.username = account.username.clone();
        }
        if auth.has_scope(UserScope::Email) {
            view.primary_email = account.primary_email.clone();
        }
        if auth.has_scope(UserScope::Phone) {
            view.primary_phone = account.primary_phone.clone();
        }
        if auth.has_scope(UserScope::Identities) {
            view.identities = Some(account.identities.clone());
        }

        view
    }
}
