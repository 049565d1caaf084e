//! Bearer-token authentication for HTTP handlers.
//!
//! Keep the HTTP modules focused on request/response mapping by concentrating
//! token parsing and identity resolution here. Handlers declare a
//! [`BearerIdentity`] parameter and receive the active account behind the
//! presented token, so a revoked or deactivated account fails before any
//! handler code runs.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, error};

use crate::domain::{Error, SessionToken, User};
use crate::inbound::http::state::HttpState;

/// Authenticated request identity resolved from a bearer token.
///
/// Extraction accepts both `Authorization: Bearer <token>` and
/// `Authorization: Token <token>`, with a case-insensitive scheme.
pub struct BearerIdentity {
    user: User,
}

impl BearerIdentity {
    /// Account resolved for the presented token.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Consume the identity, yielding the account.
    pub fn into_user(self) -> User {
        self.user
    }
}

fn parse_bearer_token(header: &str) -> Result<SessionToken, Error> {
    let mut parts = header.split_whitespace();
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(Error::unauthorized("invalid authorization header"));
    };
    if !(scheme.eq_ignore_ascii_case("bearer") || scheme.eq_ignore_ascii_case("token")) {
        return Err(Error::unauthorized("invalid authorization header"));
    }
    SessionToken::new(token).map_err(|_| Error::unauthorized("invalid token"))
}

impl FromRequest for BearerIdentity {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        Box::pin(async move {
            let Some(state) = state else {
                error!("bearer auth requires HttpState app data");
                return Err(Error::internal("Internal server error"));
            };
            let Some(header) = header else {
                return Err(Error::unauthorized("authentication required"));
            };
            let token = parse_bearer_token(&header)?;

            let user_id = match state.tokens.resolve(&token).await {
                Ok(Some(id)) => id,
                Ok(None) => {
                    debug!(token = %token.fingerprint(), "unknown session token");
                    return Err(Error::unauthorized("invalid token"));
                }
                Err(err) => {
                    error!(error = %err, "failed to resolve session token");
                    return Err(Error::internal("Internal server error"));
                }
            };

            match state.users.find_by_id(&user_id).await {
                Ok(Some(user)) if user.is_active() => Ok(Self { user }),
                Ok(_) => Err(Error::unauthorized("user inactive or deleted")),
                Err(err) => {
                    error!(error = %err, "failed to load account for token");
                    Err(Error::internal("Internal server error"))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{MockTokenIssuer, TokenIssuer, TokenStoreError};
    use crate::domain::{AccountService, CredentialVerifier, ErrorCode, NewAccount};
    use crate::outbound::{InMemoryTokenIssuer, InMemoryUserRepository};

    const SAMPLE_TOKEN: &str = "0123456789abcdef0123456789abcdef01234567";

    #[rstest]
    #[case::bearer_scheme("Bearer")]
    #[case::token_scheme("Token")]
    #[case::lowercase_scheme("bearer")]
    fn parse_accepts_known_schemes(#[case] scheme: &str) {
        let token =
            parse_bearer_token(&format!("{scheme} {SAMPLE_TOKEN}")).expect("header parses");
        assert_eq!(token.as_str(), SAMPLE_TOKEN);
    }

    #[rstest]
    #[case::missing_token("Bearer")]
    #[case::trailing_garbage("Bearer abc def")]
    #[case::unknown_scheme("Basic dXNlcjpwYXNz")]
    fn parse_rejects_malformed_headers(#[case] header: &str) {
        let err = parse_bearer_token(header).expect_err("header is malformed");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid authorization header");
    }

    #[rstest]
    fn parse_rejects_invalid_token_material() {
        let err = parse_bearer_token("Bearer not-hex").expect_err("token is invalid");
        assert_eq!(err.message(), "invalid token");
    }

    async fn seeded_state() -> (HttpState, SessionToken, User) {
        let users = Arc::new(InMemoryUserRepository::new());
        let tokens = Arc::new(InMemoryTokenIssuer::new());
        let accounts = Arc::new(AccountService::new(users.clone()));
        let verifier = Arc::new(CredentialVerifier::new(users.clone()));

        let request = NewAccount::try_from_parts("resident@example.com", "testpass123", "Resident")
            .expect("valid account input");
        let user = accounts
            .create_user(request)
            .await
            .expect("account creation succeeds");
        let token = tokens.issue(user.id()).await.expect("token issued");

        (
            HttpState::new(accounts, verifier, tokens, users),
            token,
            user,
        )
    }

    fn whoami_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new().app_data(web::Data::new(state)).route(
            "/whoami",
            web::get().to(|identity: BearerIdentity| async move {
                let email = identity.user().email().as_ref().to_owned();
                Ok::<_, Error>(HttpResponse::Ok().body(email))
            }),
        )
    }

    #[actix_web::test]
    async fn extractor_resolves_active_account() {
        let (state, token, _user) = seeded_state().await;
        let app = actix_test::init_service(whoami_app(state)).await;

        let req = actix_test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token.as_str())))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = actix_test::read_body(res).await;
        assert_eq!(body, "resident@example.com");
    }

    #[actix_web::test]
    async fn extractor_rejects_missing_header() {
        let (state, _token, _user) = seeded_state().await;
        let app = actix_test::init_service(whoami_app(state)).await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/whoami").to_request()).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn extractor_rejects_unknown_token() {
        let (state, _token, _user) = seeded_state().await;
        let app = actix_test::init_service(whoami_app(state)).await;

        let req = actix_test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {SAMPLE_TOKEN}")))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn extractor_rejects_deactivated_account() {
        let (state, token, mut user) = seeded_state().await;
        user.deactivate();
        state
            .users
            .update(&user)
            .await
            .expect("deactivation persists");
        let app = actix_test::init_service(whoami_app(state)).await;

        let req = actix_test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token.as_str())))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn extractor_maps_store_failure_to_internal() {
        let users = Arc::new(InMemoryUserRepository::new());
        let accounts = Arc::new(AccountService::new(users.clone()));
        let verifier = Arc::new(CredentialVerifier::new(users.clone()));
        let mut tokens = MockTokenIssuer::new();
        tokens
            .expect_resolve()
            .returning(|_| Err(TokenStoreError::storage("store offline")));
        let state = HttpState::new(accounts, verifier, Arc::new(tokens), users);
        let app = actix_test::init_service(whoami_app(state)).await;

        let req = actix_test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {SAMPLE_TOKEN}")))
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
