//! Domain primitives, aggregates, and use-case services.
//!
//! Purpose: Define strongly typed account entities and the services that
//! operate on them, keeping HTTP and storage concerns in the adapter layers.
//! Document invariants and serialisation contracts (serde) in each type's
//! Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - User (alias to `user::User`) — account identity, flags, and credential.
//! - Profile (alias to `user::Profile`) — client-facing projection of a user.
//! - EmailAddress (alias to `email::EmailAddress`) — normalized login email.
//! - SessionToken (alias to `tokens::SessionToken`) — opaque bearer token.
//! - AccountService (alias to `accounts::AccountService`) — create and
//!   update accounts over the [`ports::UserRepository`] port.
//! - CredentialVerifier (alias to `verifier::CredentialVerifier`) — check
//!   login credentials with a uniform failure mode.
//! - TraceId (alias to `trace_id::TraceId`) — request correlation id.

pub mod accounts;
pub mod credentials;
pub mod email;
pub mod error;
pub mod password;
pub mod ports;
pub mod tokens;
pub mod trace_id;
pub mod user;
pub mod verifier;

pub use self::accounts::{AccountService, AccountValidationError, NewAccount, ProfileUpdate};
pub use self::credentials::{Credentials, CredentialsValidationError};
pub use self::email::{EMAIL_MAX_LEN, EmailAddress, EmailValidationError};
pub use self::error::{Error, ErrorCode, ErrorDto, ErrorValidationError};
pub use self::password::{PASSWORD_MIN_LEN, PasswordHash, PasswordPolicyError};
pub use self::tokens::{SESSION_TOKEN_LEN, SessionToken, SessionTokenValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{DISPLAY_NAME_MAX, DisplayName, Profile, User, UserId, UserValidationError};
pub use self::verifier::CredentialVerifier;

/// Name of the header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use accounts::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
