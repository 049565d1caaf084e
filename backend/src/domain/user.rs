//! User account model.
//!
//! [`User`] is the persisted aggregate: identity, normalized email, display
//! name, password digest, and the account flags. It deliberately implements
//! neither `Serialize` nor `Deserialize`; adapters expose [`Profile`], a view
//! that carries only the fields clients may see.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::email::EmailAddress;
use crate::domain::password::PasswordHash;

/// Maximum allowed length for a display name, in characters.
pub const DISPLAY_NAME_MAX: usize = 255;

/// Validation errors raised by the identifier and name constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    DisplayNameTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Human readable display name for the user.
///
/// The name may be empty: accounts provisioned outside the HTTP surface, such
/// as superusers, carry no name until one is set. HTTP payload rules about
/// blank names live in the inbound adapter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(name: impl Into<String>) -> Result<Self, UserValidationError> {
        let name = name.into();
        if name.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user account.
///
/// ## Invariants
/// - `email` is stored in normalized form and never changes after creation.
/// - `password` only ever holds an Argon2id digest, never a raw password.
/// - New accounts start active with neither staff nor superuser privileges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    name: DisplayName,
    password: PasswordHash,
    is_active: bool,
    is_staff: bool,
    is_superuser: bool,
}

impl User {
    /// Build a new active [`User`] from validated components.
    pub fn new(id: UserId, email: EmailAddress, name: DisplayName, password: PasswordHash) -> Self {
        Self {
            id,
            email,
            name,
            password,
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Normalized email address used for login.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Display name shown on the profile.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Stored password digest.
    pub fn password(&self) -> &PasswordHash {
        &self.password
    }

    /// Whether the account may authenticate.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Whether the account may access staff surfaces.
    pub fn is_staff(&self) -> bool {
        self.is_staff
    }

    /// Whether the account holds every permission implicitly.
    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }

    /// Replace the display name.
    pub fn set_name(&mut self, name: DisplayName) {
        self.name = name;
    }

    /// Replace the password digest.
    pub fn set_password(&mut self, password: PasswordHash) {
        self.password = password;
    }

    /// Grant staff and superuser privileges.
    pub fn promote_to_superuser(&mut self) {
        self.is_staff = true;
        self.is_superuser = true;
    }

    /// Block the account from authenticating.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}

/// Client-facing view of a user account.
///
/// This is the only serializable projection of [`User`]; it carries the name
/// and email, and nothing credential-shaped.
///
/// # Examples
/// ```
/// use accounts::domain::Profile;
///
/// let profile = Profile {
///     name: "Ada Lovelace".to_owned(),
///     email: "ada@example.com".to_owned(),
/// };
/// assert_eq!(profile.email, "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl Profile {
    /// Project the visible fields out of a [`User`].
    pub fn of(user: &User) -> Self {
        Self {
            name: user.name().as_ref().to_owned(),
            email: user.email().as_ref().to_owned(),
        }
    }
}
