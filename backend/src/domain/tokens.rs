//! Opaque session token primitive.
//!
//! A token is 20 bytes of OS randomness, hex encoded to a fixed 40-character
//! string. Tokens are bearer credentials, so the raw value stays out of logs:
//! `Debug` renders a truncated SHA-256 fingerprint and there is no `Display`
//! implementation.

use std::fmt;

use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Number of random bytes backing a token.
const SESSION_TOKEN_BYTES: usize = 20;

/// Length of the hex-encoded token string.
pub const SESSION_TOKEN_LEN: usize = SESSION_TOKEN_BYTES * 2;

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Validation errors returned when parsing a presented token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTokenValidationError {
    /// The value is not exactly [`SESSION_TOKEN_LEN`] characters long.
    InvalidLength { expected: usize },
    /// The value contains characters outside lowercase hex.
    InvalidCharacters,
}

impl fmt::Display for SessionTokenValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength { expected } => {
                write!(f, "session token must be exactly {expected} characters")
            }
            Self::InvalidCharacters => {
                write!(f, "session token must be lowercase hex")
            }
        }
    }
}

impl std::error::Error for SessionTokenValidationError {}

/// Opaque bearer token tying a request to an authenticated user.
///
/// # Examples
/// ```
/// use accounts::domain::{SESSION_TOKEN_LEN, SessionToken};
///
/// let token = SessionToken::generate();
/// assert_eq!(token.as_str().len(), SESSION_TOKEN_LEN);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionToken(String);

impl SessionToken {
    /// Mint a fresh token from OS randomness.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; SESSION_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Validate and construct a token from a presented string.
    pub fn new(token: impl AsRef<str>) -> Result<Self, SessionTokenValidationError> {
        let token = token.as_ref();
        if token.len() != SESSION_TOKEN_LEN {
            return Err(SessionTokenValidationError::InvalidLength {
                expected: SESSION_TOKEN_LEN,
            });
        }
        if !token
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        {
            return Err(SessionTokenValidationError::InvalidCharacters);
        }
        Ok(Self(token.to_owned()))
    }

    /// The raw token text, for response payloads and store lookups.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Truncated SHA-256 fingerprint of the token, safe for logs.
    ///
    /// Returns the first 8 bytes of the digest as a 16-character hex string,
    /// enough for visual correlation without exposing the credential.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        let digest = hasher.finalize();
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken")
            .field(&self.fingerprint())
            .finish()
    }
}

impl From<SessionToken> for String {
    fn from(value: SessionToken) -> Self {
        value.0
    }
}

impl TryFrom<String> for SessionToken {
    type Error = SessionTokenValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn generated_tokens_are_forty_lowercase_hex_characters() {
        let token = SessionToken::generate();
        assert_eq!(token.as_str().len(), SESSION_TOKEN_LEN);
        assert!(
            token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[rstest]
    fn generated_tokens_differ() {
        assert_ne!(SessionToken::generate(), SessionToken::generate());
    }

    #[rstest]
    fn round_trips_through_new() {
        let token = SessionToken::generate();
        let reparsed = SessionToken::new(token.as_str()).expect("generated tokens are valid");
        assert_eq!(reparsed, token);
    }

    #[rstest]
    #[case("", SessionTokenValidationError::InvalidLength { expected: SESSION_TOKEN_LEN })]
    #[case("abc123", SessionTokenValidationError::InvalidLength { expected: SESSION_TOKEN_LEN })]
    fn wrong_lengths_are_rejected(
        #[case] raw: &str,
        #[case] expected: SessionTokenValidationError,
    ) {
        let err = SessionToken::new(raw).expect_err("invalid input must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn uppercase_and_non_hex_are_rejected() {
        let uppercase = SessionToken::generate().as_str().to_uppercase();
        let err = SessionToken::new(&uppercase).expect_err("uppercase must fail");
        assert_eq!(err, SessionTokenValidationError::InvalidCharacters);

        let non_hex = "z".repeat(SESSION_TOKEN_LEN);
        let err = SessionToken::new(&non_hex).expect_err("non-hex must fail");
        assert_eq!(err, SessionTokenValidationError::InvalidCharacters);
    }

    #[rstest]
    fn fingerprint_is_stable_and_short() {
        let token = SessionToken::generate();
        assert_eq!(token.fingerprint(), token.fingerprint());
        assert_eq!(token.fingerprint().len(), FINGERPRINT_BYTES * 2);
    }

    #[rstest]
    fn debug_output_hides_the_raw_token() {
        let token = SessionToken::generate();
        let rendered = format!("{token:?}");
        assert!(rendered.contains(&token.fingerprint()));
        assert!(!rendered.contains(token.as_str()));
    }

    #[rstest]
    fn serializes_as_the_raw_string() {
        let token = SessionToken::generate();
        let raw = serde_json::to_string(&token).expect("token serializes");
        assert_eq!(raw, format!("\"{}\"", token.as_str()));

        let parsed: SessionToken = serde_json::from_str(&raw).expect("token deserializes");
        assert_eq!(parsed, token);
    }
}
