//! Account self-service profile operations.
//!
//! Realizes the account-mutation side of the gate contract: every sensitive
//! mutation is authorized first, then committed by consuming the gating
//! verification record(s) and writing the account. Consumption uses the
//! repository's conditional status transition, so of two racing duplicate
//! commits exactly one wins and the loser observes `AlreadyConsumed`.

mod config;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::ProfileServiceConfig;
pub use service::ProfileService;
pub use types::{
    ChangeEmailRequest, ChangePhoneRequest, LinkIdentityRequest, ProfileView,
    SetPasswordRequest, UnlinkIdentityRequest, UpdateProfileRequest,
};
