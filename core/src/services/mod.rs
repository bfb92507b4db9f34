//! Business services containing domain logic and use cases.

pub mod gate;
pub mod password;
pub mod profile;
pub mod verification;

// Re-export commonly used types
pub use gate::{
    AuthorizedIdentityChange, IdentifierCollisionChecker, IdentityChangeRequest,
    SensitivePermissionGate,
};
pub use password::{PasswordPolicy, PasswordPolicyValidator, ViolationReporting};
pub use profile::{
    ChangeEmailRequest, ChangePhoneRequest, LinkIdentityRequest, ProfileService,
    ProfileServiceConfig, ProfileView, SetPasswordRequest, UnlinkIdentityRequest,
    UpdateProfileRequest,
};
pub use verification::{VerificationRecordFactory, VerificationRecordView};
