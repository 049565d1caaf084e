//! Account management: creation, superuser elevation, and profile updates.
//!
//! [`AccountService`] sits between inbound adapters and the
//! [`UserRepository`] port. Inputs arrive pre-validated as [`NewAccount`] or
//! [`ProfileUpdate`] values, so by the time the service runs, the only
//! failures left are hashing and persistence.

use std::fmt;
use std::sync::Arc;

use serde_json::json;
use tracing::{error, info};
use zeroize::Zeroizing;

use crate::domain::email::{EmailAddress, EmailValidationError};
use crate::domain::error::Error;
use crate::domain::password::{self, PasswordHash, PasswordPolicyError};
use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::user::{DisplayName, Profile, User, UserId, UserValidationError};

/// Validation failures raised while assembling account inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    Email(EmailValidationError),
    Name(UserValidationError),
    Password(PasswordPolicyError),
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(err) => err.fmt(f),
            Self::Name(err) => err.fmt(f),
            Self::Password(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for AccountValidationError {}

impl From<EmailValidationError> for AccountValidationError {
    fn from(value: EmailValidationError) -> Self {
        Self::Email(value)
    }
}

impl From<UserValidationError> for AccountValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::Name(value)
    }
}

impl From<PasswordPolicyError> for AccountValidationError {
    fn from(value: PasswordPolicyError) -> Self {
        Self::Password(value)
    }
}

/// Validated input for creating an account.
///
/// Construction normalizes the email, applies the password policy, and bounds
/// the name, so a `NewAccount` is always storable as-is. The display name may
/// be empty here; requiring one is an HTTP payload rule.
///
/// # Examples
/// ```
/// use accounts::domain::NewAccount;
///
/// let request = NewAccount::try_from_parts("Ada@EXAMPLE.com", "testpass123", "Ada")
///     .expect("valid input");
/// assert_eq!(request.email().as_ref(), "Ada@example.com");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct NewAccount {
    email: EmailAddress,
    name: DisplayName,
    password: Zeroizing<String>,
}

impl NewAccount {
    /// Validate raw creation inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Self, AccountValidationError> {
        let email = EmailAddress::new(email)?;
        password::validate_password(password)?;
        let name = DisplayName::new(name)?;
        Ok(Self {
            email,
            name,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalized email the account will be stored under.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Display name the account will carry.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated partial update for a profile.
///
/// Absent fields stay untouched; a present password passes the same policy as
/// account creation and is re-hashed before storage.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ProfileUpdate {
    name: Option<DisplayName>,
    password: Option<Zeroizing<String>>,
}

impl ProfileUpdate {
    /// Validate raw update inputs, each field optional.
    pub fn try_from_parts(
        name: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, AccountValidationError> {
        let name = name.map(DisplayName::new).transpose()?;
        let password = match password {
            Some(candidate) => {
                password::validate_password(candidate)?;
                Some(Zeroizing::new(candidate.to_owned()))
            }
            None => None,
        };
        Ok(Self { name, password })
    }
}

impl fmt::Debug for ProfileUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileUpdate")
            .field("name", &self.name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Use-case service for account lifecycle operations.
pub struct AccountService {
    users: Arc<dyn UserRepository>,
}

impl AccountService {
    /// Build the service over a user repository port.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Create a regular active account.
    ///
    /// The duplicate check and insert happen atomically inside the
    /// repository, so two racing requests for one email cannot both succeed.
    pub async fn create_user(&self, request: NewAccount) -> Result<User, Error> {
        let NewAccount {
            email,
            name,
            password,
        } = request;
        let digest = hash_or_internal(&password)?;
        let user = User::new(UserId::random(), email, name, digest);

        match self.users.insert(&user).await {
            Ok(()) => {
                info!(user_id = %user.id(), "created user account");
                Ok(user)
            }
            Err(UserPersistenceError::DuplicateEmail { .. }) => {
                Err(
                    Error::invalid_request("a user with this email already exists")
                        .with_details(json!({ "field": "email", "code": "duplicate_email" })),
                )
            }
            Err(err) => {
                error!(error = %err, "failed to persist new account");
                Err(Error::internal("Internal server error"))
            }
        }
    }

    /// Create an account carrying staff and superuser privileges.
    ///
    /// Mirrors the two-step shape of regular creation followed by elevation:
    /// the account is inserted active and unprivileged, then updated with
    /// both flags set. Superusers start with an empty display name.
    pub async fn create_superuser(&self, email: &str, password: &str) -> Result<User, Error> {
        let request = NewAccount::try_from_parts(email, password, "")
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        let mut user = self.create_user(request).await?;
        user.promote_to_superuser();

        match self.users.update(&user).await {
            Ok(()) => {
                info!(user_id = %user.id(), "elevated account to superuser");
                Ok(user)
            }
            Err(err) => {
                error!(error = %err, "failed to persist superuser flags");
                Err(Error::internal("Internal server error"))
            }
        }
    }

    /// Apply a partial profile update and return the resulting view.
    pub async fn update_profile(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<Profile, Error> {
        let mut user = match self.users.find_by_id(id).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(Error::unauthorized("user inactive or deleted")),
            Err(err) => {
                error!(error = %err, "failed to load account for update");
                return Err(Error::internal("Internal server error"));
            }
        };

        let ProfileUpdate { name, password } = update;
        if let Some(name) = name {
            user.set_name(name);
        }
        if let Some(password) = password {
            user.set_password(hash_or_internal(&password)?);
        }

        match self.users.update(&user).await {
            Ok(()) => Ok(Profile::of(&user)),
            Err(err) => {
                error!(error = %err, "failed to persist profile update");
                Err(Error::internal("Internal server error"))
            }
        }
    }
}

fn hash_or_internal(password: &str) -> Result<PasswordHash, Error> {
    password::hash_password(password).map_err(|err| {
        error!(error = %err, "password hashing failed");
        Error::internal("Internal server error")
    })
}
