//! Password policy and Argon2id hashing.
//!
//! Raw passwords never leave this module in hashed form other than as a
//! [`PasswordHash`] carrying a PHC-format digest. Verification failures and
//! unknown accounts cost the same Argon2 work, so response timing does not
//! reveal whether an email is registered.

use std::fmt;
use std::sync::OnceLock;

use argon2::Argon2;
use argon2::password_hash::{
    PasswordHash as ParsedHash, PasswordHasher, PasswordVerifier, SaltString, rand_core,
};

/// Minimum accepted password length, in characters.
pub const PASSWORD_MIN_LEN: usize = 5;

/// Policy violations raised by [`validate_password`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// The password is shorter than [`PASSWORD_MIN_LEN`] characters.
    TooShort { min: usize },
}

impl fmt::Display for PasswordPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for PasswordPolicyError {}

/// Argon2id digest of a password in PHC string format.
///
/// The digest text is deliberately unreachable outside this module and the
/// `Debug` output is redacted, so hashes cannot drift into logs or payloads.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordHash").field(&"<redacted>").finish()
    }
}

/// Check a raw password against the account password policy.
pub fn validate_password(candidate: &str) -> Result<(), PasswordPolicyError> {
    if candidate.chars().count() < PASSWORD_MIN_LEN {
        return Err(PasswordPolicyError::TooShort {
            min: PASSWORD_MIN_LEN,
        });
    }
    Ok(())
}

/// Hash a raw password with Argon2id and a fresh OS-random salt.
pub fn hash_password(candidate: &str) -> Result<PasswordHash, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    let digest = Argon2::default()
        .hash_password(candidate.as_bytes(), &salt)?
        .to_string();
    Ok(PasswordHash(digest))
}

/// Verify a candidate password against a stored digest.
#[must_use]
pub fn verify_password(hash: &PasswordHash, candidate: &str) -> bool {
    let Ok(parsed) = ParsedHash::new(&hash.0) else {
        return false;
    };
    Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok()
}

static DUMMY_HASH: OnceLock<Option<PasswordHash>> = OnceLock::new();

fn dummy_hash() -> Option<&'static PasswordHash> {
    DUMMY_HASH
        .get_or_init(|| hash_password("timing-equalizer-dummy").ok())
        .as_ref()
}

/// Burn roughly the same Argon2 work as a real verification.
///
/// Callers invoke this when no account matches the presented email, keeping
/// the miss path as slow as a genuine digest check.
pub fn equalize_verification_work(candidate: &str) {
    if let Some(hash) = dummy_hash() {
        let _mismatch = verify_password(hash, candidate);
    }
}
