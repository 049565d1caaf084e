//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and ports and remain testable without real I/O.

use std::sync::Arc;

use crate::domain::ports::{TokenIssuer, UserRepository};
use crate::domain::{AccountService, CredentialVerifier};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<AccountService>,
    pub verifier: Arc<CredentialVerifier>,
    pub tokens: Arc<dyn TokenIssuer>,
    pub users: Arc<dyn UserRepository>,
}

impl HttpState {
    /// Construct state from its service and port dependencies.
    ///
    /// The `users` port is shared with the bearer-token extractor, which
    /// re-reads the account behind each presented token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use accounts::domain::{AccountService, CredentialVerifier};
    /// use accounts::inbound::http::state::HttpState;
    /// use accounts::outbound::{InMemoryTokenIssuer, InMemoryUserRepository};
    ///
    /// let users = Arc::new(InMemoryUserRepository::new());
    /// let state = HttpState::new(
    ///     Arc::new(AccountService::new(users.clone())),
    ///     Arc::new(CredentialVerifier::new(users.clone())),
    ///     Arc::new(InMemoryTokenIssuer::new()),
    ///     users,
    /// );
    /// let _tokens = state.tokens.clone();
    /// ```
    pub fn new(
        accounts: Arc<AccountService>,
        verifier: Arc<CredentialVerifier>,
        tokens: Arc<dyn TokenIssuer>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            accounts,
            verifier,
            tokens,
            users,
        }
    }
}
