//! Configuration for the profile service.

use crate::services::password::PasswordPolicy;

/// Configuration for the profile service
#[derive(Debug, Clone)]
pub struct ProfileServiceConfig {
    /// Password policy applied when setting a new password
    pub password_policy: PasswordPolicy,

    /// bcrypt cost used when hashing new passwords
    pub bcrypt_cost: u32,
}

impl Default for ProfileServiceConfig {
    fn default() -> Self {
        Self {
            password_policy: PasswordPolicy::default(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}
