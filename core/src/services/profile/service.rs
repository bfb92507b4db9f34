//! Profile service implementation.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use guard_shared::validation;

use crate::domain::entities::account::{Account, SocialIdentity};
use crate::domain::entities::verification_record::{VerificationStatus, VerificationType};
use crate::domain::value_objects::auth_context::{AuthContext, UserScope};
use crate::domain::value_objects::identifier::AccountIdentifier;
use crate::errors::{DomainError, DomainResult, PermissionError, VerificationError};
use crate::repositories::account::AccountRepository;
use crate::repositories::verification::VerificationRecordRepository;
use crate::services::gate::{
    AuthorizedIdentityChange, IdentifierCollisionChecker, IdentityChangeRequest,
    SensitivePermissionGate,
};
use crate::services::password::PasswordPolicyValidator;
use crate::services::verification::VerificationRecordFactory;

use super::config::ProfileServiceConfig;
use super::types::{
    ChangeEmailRequest, ChangePhoneRequest, LinkIdentityRequest, ProfileView,
    SetPasswordRequest, UnlinkIdentityRequest, UpdateProfileRequest,
};

/// Account self-service operations behind the sensitive permission gate
pub struct ProfileService<V, A>
where
    V: VerificationRecordRepository,
    A: AccountRepository,
{
    records: Arc<V>,
    accounts: Arc<A>,
    factory: VerificationRecordFactory<V>,
    gate: SensitivePermissionGate<V, A>,
    collision_checker: IdentifierCollisionChecker<A>,
    password_validator: PasswordPolicyValidator,
    config: ProfileServiceConfig,
}

impl<V, A> ProfileService<V, A>
where
    V: VerificationRecordRepository,
    A: AccountRepository,
{
    /// Create a new profile service
    ///
    /// # Arguments
    ///
    /// * `records` - Verification record repository
    /// * `accounts` - Account repository
    /// * `config` - Service configuration
    pub fn new(records: Arc<V>, accounts: Arc<A>, config: ProfileServiceConfig) -> Self {
        Self {
            factory: VerificationRecordFactory::new(Arc::clone(&records)),
            gate: SensitivePermissionGate::new(Arc::clone(&records), Arc::clone(&accounts)),
            collision_checker: IdentifierCollisionChecker::new(Arc::clone(&accounts)),
            password_validator: PasswordPolicyValidator::new(config.password_policy.clone()),
            records,
            accounts,
            config,
        }
    }

    /// The gate used by this service
    pub fn gate(&self) -> &SensitivePermissionGate<V, A> {
        &self.gate
    }

    /// Fetch the caller's profile, filtered by the caller's scopes
    pub async fn get_profile(&self, auth: &AuthContext) -> DomainResult<ProfileView> {
        let account = self.load_account(auth.user_id).await?;
        Ok(ProfileView::scoped(&account, auth))
    }

    /// Update basic profile attributes (name, avatar, username).
    ///
    /// Requires the `profile` scope. A username change runs the collision
    /// checker; no verification record is involved since a username is not
    /// a challenge channel.
    pub async fn update_profile(
        &self,
        auth: &AuthContext,
        request: UpdateProfileRequest,
    ) -> DomainResult<ProfileView> {
        if !auth.has_scope(UserScope::Profile) {
            return Err(PermissionError::MissingScope {
                scope: UserScope::Profile.to_string(),
            }
            .into());
        }

        if let Some(username) = &request.username {
            if !validation::is_valid_username(username) {
                return Err(DomainError::Validation {
                    message: "Invalid username format".to_string(),
                });
            }
            self.collision_checker
                .ensure_available(
                    &AccountIdentifier::username(username.clone()),
                    auth.user_id,
                )
                .await?;
        }

        let mut account = self.load_account(auth.user_id).await?;
        if let Some(name) = request.name {
            account.set_name(Some(name));
        }
        if let Some(avatar) = request.avatar {
            account.set_avatar(Some(avatar));
        }
        if let Some(username) = request.username {
            account.set_username(Some(username));
        }
        let account = self.accounts.update(account).await?;

        tracing::info!(
            user_id = %auth.user_id,
            event = "profile_updated",
            "Basic profile attributes updated"
        );

        Ok(ProfileView::scoped(&account, auth))
    }

    /// Set or replace the account password.
    ///
    /// This method:
    /// 1. Validates the candidate against the password policy and the
    ///    account's history
    /// 2. Verifies the sensitive permission via the gate
    /// 3. Consumes the proof record and writes the new hash
    ///
    /// Any failed check leaves the record and the account untouched.
    pub async fn set_password(
        &self,
        auth: &AuthContext,
        request: SetPasswordRequest,
    ) -> DomainResult<()> {
        let account = self.load_account(auth.user_id).await?;
        self.password_validator.validate(&request.password, &account)?;

        let proof = self
            .gate
            .authorize_owned_record(auth, request.verification_record_id, UserScope::Profile)
            .await?;

        let hash = bcrypt::hash(&request.password, self.config.bcrypt_cost).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to hash password: {e}"),
            }
        })?;

        self.consume_record(proof.id).await?;
        let mut account = self.load_account(auth.user_id).await?;
        account.set_password_hash(hash);
        self.accounts.update(account).await?;

        tracing::info!(
            user_id = %auth.user_id,
            event = "password_updated",
            "Account password updated"
        );

        Ok(())
    }

    /// Change the primary email address.
    ///
    /// Requires the `email` scope, a current-proof record, and a verified
    /// email-code record matching the new address. Both records are
    /// consumed with the write.
    pub async fn change_primary_email(
        &self,
        auth: &AuthContext,
        request: ChangeEmailRequest,
    ) -> DomainResult<()> {
        if !validation::is_valid_email(&request.email) {
            return Err(DomainError::Validation {
                message: "Invalid email format".to_string(),
            });
        }

        let authorized = self
            .gate
            .authorize_identity_change(
                auth,
                IdentityChangeRequest {
                    current_record_id: request.verification_record_id,
                    new_identifier_record_id: request.new_identifier_verification_record_id,
                    candidate: AccountIdentifier::email(request.email.clone()),
                },
            )
            .await?;

        let email = request.email;
        self.commit_identity_change(auth.user_id, authorized, move |account| {
            account.set_primary_email(Some(email));
        })
        .await?;

        Ok(())
    }

    /// Change the primary phone number.
    ///
    /// Requires the `phone` scope, a current-proof record, and a verified
    /// phone-code record matching the new number. Both records are consumed
    /// with the write.
    pub async fn change_primary_phone(
        &self,
        auth: &AuthContext,
        request: ChangePhoneRequest,
    ) -> DomainResult<()> {
        if !validation::is_valid_phone(&request.phone) {
            return Err(DomainError::Validation {
                message: "Invalid phone format".to_string(),
            });
        }

        let authorized = self
            .gate
            .authorize_identity_change(
                auth,
                IdentityChangeRequest {
                    current_record_id: request.verification_record_id,
                    new_identifier_record_id: request.new_identifier_verification_record_id,
                    candidate: AccountIdentifier::phone(request.phone.clone()),
                },
            )
            .await?;

        let phone = request.phone;
        self.commit_identity_change(auth.user_id, authorized, move |account| {
            account.set_primary_phone(Some(phone));
        })
        .await?;

        Ok(())
    }

    /// Link the social identity attested by a social verification record.
    ///
    /// The identity being linked is whatever the record attests; the caller
    /// supplies only record ids. A provider that is already linked on this
    /// account, or an identity claimed by another account, is rejected.
    pub async fn link_identity(
        &self,
        auth: &AuthContext,
        request: LinkIdentityRequest,
    ) -> DomainResult<()> {
        let attested = self
            .factory
            .resolve(
                request.new_identifier_verification_record_id,
                VerificationType::Social,
            )
            .await?;
        let Some(AccountIdentifier::Social { provider, subject }) = attested.identifier else {
            return Err(DomainError::Validation {
                message: "Social verification record carries no identity".to_string(),
            });
        };

        let account = self.load_account(auth.user_id).await?;
        if account.has_identity(&provider) {
            return Err(PermissionError::IdentifierAlreadyInUse.into());
        }

        let authorized = self
            .gate
            .authorize_identity_change(
                auth,
                IdentityChangeRequest {
                    current_record_id: request.verification_record_id,
                    new_identifier_record_id: request.new_identifier_verification_record_id,
                    candidate: AccountIdentifier::social(provider.clone(), subject.clone()),
                },
            )
            .await?;

        self.commit_identity_change(auth.user_id, authorized, move |account| {
            account.link_identity(
                provider,
                SocialIdentity {
                    subject,
                    linked_at: Utc::now(),
                },
            );
        })
        .await?;

        Ok(())
    }

    /// Unlink the social identity for `request.target`.
    ///
    /// Requires the `identities` scope and a current-proof record, which is
    /// consumed with the write. A provider that is not linked yields a
    /// not-found error, matching the visibility of the resource itself.
    pub async fn unlink_identity(
        &self,
        auth: &AuthContext,
        request: UnlinkIdentityRequest,
    ) -> DomainResult<()> {
        let proof = self
            .gate
            .authorize_owned_record(auth, request.verification_record_id, UserScope::Identities)
            .await?;

        let mut account = self.load_account(auth.user_id).await?;
        if !account.has_identity(&request.target) {
            return Err(DomainError::NotFound {
                resource: format!("identity {}", request.target),
            });
        }

        self.consume_record(proof.id).await?;
        account.unlink_identity(&request.target);
        self.accounts.update(account).await?;

        tracing::info!(
            user_id = %auth.user_id,
            provider = %request.target,
            event = "identity_unlinked",
            "Social identity unlinked"
        );

        Ok(())
    }

    async fn load_account(&self, user_id: Uuid) -> DomainResult<Account> {
        self.accounts
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                resource: "Account".to_string(),
            })
    }

    /// Transition a record from `Verified` to `Consumed`.
    ///
    /// The conditional update is the serialization point for racing
    /// commits: the loser observes the record as no longer consumable.
    async fn consume_record(&self, record_id: Uuid) -> DomainResult<()> {
        let swapped = self
            .records
            .compare_and_swap_status(
                record_id,
                VerificationStatus::Verified,
                VerificationStatus::Consumed,
            )
            .await?;
        if !swapped {
            tracing::warn!(
                record_id = %record_id,
                event = "verification_consume_conflict",
                "Verification record was no longer consumable at commit time"
            );
            return Err(VerificationError::AlreadyConsumed.into());
        }

        tracing::debug!(
            record_id = %record_id,
            event = "verification_record_consumed",
            "Verification record consumed"
        );
        Ok(())
    }

    /// Commit an authorized identity change.
    ///
    /// Consumption precedes the account write: an interrupted commit burns
    /// the challenge and leaves the account unchanged, never the reverse.
    /// The store re-checks identifier uniqueness with the write, so a
    /// racing claim of the same identifier fails here even after the gate's
    /// early check passed.
    async fn commit_identity_change<F>(
        &self,
        user_id: Uuid,
        authorized: AuthorizedIdentityChange,
        apply: F,
    ) -> DomainResult<Account>
    where
        F: FnOnce(&mut Account),
    {
        self.consume_record(authorized.current.id).await?;
        self.consume_record(authorized.new_identifier.id).await?;

        let mut account = self.load_account(user_id).await?;
        apply(&mut account);
        let account = self.accounts.update(account).await?;

        tracing::info!(
            user_id = %user_id,
            kind = ?authorized.candidate.kind(),
            identifier = %authorized.candidate.masked(),
            event = "identity_changed",
            "Account identifier changed"
        );
        Ok(account)
    }
}
