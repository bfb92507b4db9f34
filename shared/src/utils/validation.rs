//! Identifier format validation
//!
//! Format rules for the unique identifiers an account can be reached by.
//! These checks run once at the operation boundary; the domain layer assumes
//! well-formed values.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum accepted length for any identifier value
pub const MAX_IDENTIFIER_LENGTH: usize = 128;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// E.164 phone format: leading +, country code, 7 to 15 digits total
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{6,14}$").expect("valid phone regex"));

static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid username regex"));

/// Check if a string is a well-formed email address
pub fn is_valid_email(value: &str) -> bool {
    value.len() <= MAX_IDENTIFIER_LENGTH && EMAIL_REGEX.is_match(value)
}

/// Check if a string is a well-formed E.164 phone number
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_REGEX.is_match(value)
}

/// Check if a string is a well-formed username
pub fn is_valid_username(value: &str) -> bool {
    value.len() <= MAX_IDENTIFIER_LENGTH && USERNAME_REGEX.is_match(value)
}

/// Compare two email addresses for identity.
///
/// The local part compares exactly; the domain compares case-insensitively.
/// Values without an `@` fall back to an exact comparison.
pub fn emails_match(a: &str, b: &str) -> bool {
    match (a.rsplit_once('@'), b.rsplit_once('@')) {
        (Some((local_a, domain_a)), Some((local_b, domain_b))) => {
            local_a == local_b && domain_a.eq_ignore_ascii_case(domain_b)
        }
        _ => a == b,
    }
}

/// Extract the local part of an email address, if present
pub fn email_local_part(value: &str) -> Option<&str> {
    value.rsplit_once('@').map(|(local, _)| local)
}
