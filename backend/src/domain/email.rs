//! Email address primitive used as the login identifier.
//!
//! Accounts are keyed by email rather than a separate username. Construction
//! normalizes the value: surrounding whitespace is trimmed and the domain part
//! (everything after the final `@`) is lowercased, while the local part keeps
//! its case. Lookups elsewhere compare against this stored, normalized form.

use std::fmt;

/// Maximum accepted length for an email address, in characters.
pub const EMAIL_MAX_LEN: usize = 255;

/// Validation errors returned by [`EmailAddress::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    /// The address was missing or blank once trimmed.
    Empty,
    /// The address lacks a usable `local@domain` shape.
    InvalidFormat,
    /// The address exceeds [`EMAIL_MAX_LEN`] characters.
    TooLong { max: usize },
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Clients and tests match on this exact sentence.
            Self::Empty => write!(f, "User must have an email address."),
            Self::InvalidFormat => write!(f, "enter a valid email address"),
            Self::TooLong { max } => {
                write!(f, "email must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for EmailValidationError {}

/// Normalized email address.
///
/// ## Invariants
/// - Non-empty, trimmed, at most [`EMAIL_MAX_LEN`] characters.
/// - Contains a non-empty local part and a non-empty, lowercased domain part
///   split on the final `@`. A local part may itself contain `@` characters.
///
/// # Examples
/// ```
/// use accounts::domain::EmailAddress;
///
/// let email = EmailAddress::new("Ada@EXAMPLE.com").expect("valid address");
/// assert_eq!(email.as_ref(), "Ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate, normalize, and construct an [`EmailAddress`].
    pub fn new(email: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(EmailValidationError::InvalidFormat);
        }

        let (local, domain) = trimmed
            .rsplit_once('@')
            .ok_or(EmailValidationError::InvalidFormat)?;
        if local.is_empty() || domain.is_empty() {
            return Err(EmailValidationError::InvalidFormat);
        }

        if trimmed.chars().count() > EMAIL_MAX_LEN {
            return Err(EmailValidationError::TooLong { max: EMAIL_MAX_LEN });
        }

        let mut normalized = String::with_capacity(trimmed.len());
        normalized.push_str(local);
        normalized.push('@');
        normalized.push_str(&domain.to_lowercase());
        Ok(Self(normalized))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
