//! User account API handlers.
//!
//! ```text
//! POST /user/create {"email":"ada@example.com","password":"testpass123","name":"Ada"}
//! POST /user/token {"email":"ada@example.com","password":"testpass123"}
//! GET /user/me
//! PATCH /user/me {"name":"Ada Lovelace"}
//! ```
//!
//! `/me` accepts only `GET` and `PATCH`; every other method receives a
//! `405 Method Not Allowed` envelope.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::domain::{
    AccountValidationError, Credentials, CredentialsValidationError, EmailValidationError, Error,
    ErrorCode, NewAccount, Profile, ProfileUpdate, SessionToken,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerIdentity;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, blank_field_error, require_field};

const EMAIL_FIELD: FieldName = FieldName::new("email");
const PASSWORD_FIELD: FieldName = FieldName::new("password");
const NAME_FIELD: FieldName = FieldName::new("name");

/// Registration request body for `POST /user/create`.
///
/// Example JSON:
/// `{"email":"ada@example.com","password":"testpass123","name":"Ada"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// Login request body for `POST /user/token`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct TokenRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Token response body for `POST /user/token`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenResponse {
    /// Opaque bearer token to present in the `Authorization` header.
    #[schema(value_type = String, example = "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b")]
    pub token: SessionToken,
}

/// Partial update body for `PATCH /user/me`.
///
/// Absent fields are left unchanged.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Register a new user account.
///
/// Uses the centralised `Error` type so clients get a consistent
/// error schema across all endpoints.
#[utoipa::path(
    post,
    path = "/user/create",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Account created", body = Profile),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["user"],
    operation_id = "createUser",
    security([])
)]
#[post("/create")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let CreateUserRequest {
        email,
        password,
        name,
    } = payload.into_inner();
    let email = require_field(email, EMAIL_FIELD)?;
    let password = require_field(password, PASSWORD_FIELD)?;
    let name = require_field(name, NAME_FIELD)?;

    let name = name.trim();
    if name.is_empty() {
        return Err(blank_field_error(NAME_FIELD));
    }

    let request = NewAccount::try_from_parts(email.trim(), &password, name)
        .map_err(map_account_validation_error)?;
    let user = state.accounts.create_user(request).await?;
    Ok(HttpResponse::Created().json(Profile::of(&user)))
}

/// Exchange login credentials for a session token.
///
/// Authentication failures deliberately return `400` with a generic message
/// so the endpoint cannot be used to probe which emails are registered.
#[utoipa::path(
    post,
    path = "/user/token",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid request or credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["user"],
    operation_id = "issueToken",
    security([])
)]
#[post("/token")]
pub async fn issue_token(
    state: web::Data<HttpState>,
    payload: web::Json<TokenRequest>,
) -> ApiResult<web::Json<TokenResponse>> {
    let TokenRequest { email, password } = payload.into_inner();
    let email = require_field(email, EMAIL_FIELD)?;
    let password = require_field(password, PASSWORD_FIELD)?;

    let credentials = Credentials::try_from_parts(&email, &password)
        .map_err(map_credentials_validation_error)?;
    let user = state
        .verifier
        .verify(&credentials)
        .await
        .map_err(map_login_failure)?;

    let token = match state.tokens.issue(user.id()).await {
        Ok(token) => token,
        Err(err) => {
            error!(error = %err, "failed to issue session token");
            return Err(Error::internal("Internal server error"));
        }
    };
    Ok(web::Json(TokenResponse { token }))
}

/// Return the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/user/me",
    responses(
        (status = 200, description = "Current profile", body = Profile),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 405, description = "Method not allowed", body = Error)
    ),
    tags = ["user"],
    operation_id = "currentProfile",
    security(("BearerToken" = []))
)]
pub async fn current_profile(identity: BearerIdentity) -> ApiResult<web::Json<Profile>> {
    Ok(web::Json(Profile::of(identity.user())))
}

/// Apply a partial update to the authenticated user's profile.
#[utoipa::path(
    patch,
    path = "/user/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = Profile),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 405, description = "Method not allowed", body = Error)
    ),
    tags = ["user"],
    operation_id = "updateProfile",
    security(("BearerToken" = []))
)]
pub async fn update_profile(
    identity: BearerIdentity,
    state: web::Data<HttpState>,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<Profile>> {
    let UpdateProfileRequest { name, password } = payload.into_inner();
    let name = match name {
        Some(raw) => {
            let trimmed = raw.trim().to_owned();
            if trimmed.is_empty() {
                return Err(blank_field_error(NAME_FIELD));
            }
            Some(trimmed)
        }
        None => None,
    };

    let update = ProfileUpdate::try_from_parts(name.as_deref(), password.as_deref())
        .map_err(map_account_validation_error)?;
    let profile = state
        .accounts
        .update_profile(identity.user().id(), update)
        .await?;
    Ok(web::Json(profile))
}

async fn profile_method_not_allowed() -> ApiResult<HttpResponse> {
    Err(Error::method_not_allowed("method not allowed on this endpoint"))
}

/// Assemble the `/me` resource with its method table.
///
/// A resource-level default service keeps unsupported methods inside the
/// shared error envelope instead of Actix's plain-text 404 fallthrough.
pub fn profile_resource() -> actix_web::Resource {
    web::resource("/me")
        .route(web::get().to(current_profile))
        .route(web::patch().to(update_profile))
        .default_service(web::to(profile_method_not_allowed))
}

fn map_account_validation_error(err: AccountValidationError) -> Error {
    let (field, code) = match &err {
        AccountValidationError::Email(EmailValidationError::Empty) => ("email", "blank_email"),
        AccountValidationError::Email(EmailValidationError::InvalidFormat) => {
            ("email", "invalid_email")
        }
        AccountValidationError::Email(EmailValidationError::TooLong { .. }) => {
            ("email", "email_too_long")
        }
        AccountValidationError::Name(_) => ("name", "name_too_long"),
        AccountValidationError::Password(_) => ("password", "password_too_short"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn map_credentials_validation_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        CredentialsValidationError::EmptyPassword => {
            Error::invalid_request("password must not be empty")
                .with_details(json!({ "field": "password", "code": "empty_password" }))
        }
    }
}

fn map_login_failure(err: Error) -> Error {
    if err.code() == ErrorCode::Unauthorized {
        Error::invalid_request("unable to authenticate with provided credentials")
            .with_details(json!({ "code": "authentication_failed" }))
    } else {
        err
    }
}
