//! In-memory session token issuer.
//!
//! Purpose: back the [`TokenIssuer`] port with a process-local store that
//! keeps at most one token per user. Repeat logins return the stored token
//! rather than minting a fresh one, mirroring a keyed token table.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::ports::{TokenIssuer, TokenStoreError};
use crate::domain::{SessionToken, UserId};

struct IssuedToken {
    token: SessionToken,
    created: DateTime<Utc>,
}

#[derive(Default)]
struct TokenStore {
    by_user: HashMap<String, IssuedToken>,
    by_token: HashMap<String, String>,
}

/// Process-local [`TokenIssuer`] implementation.
#[derive(Default)]
pub struct InMemoryTokenIssuer {
    store: Mutex<TokenStore>,
}

impl InMemoryTokenIssuer {
    /// Create an empty token store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<MutexGuard<'_, TokenStore>, TokenStoreError> {
        self.store
            .lock()
            .map_err(|_| TokenStoreError::storage("token store mutex poisoned"))
    }
}

#[async_trait]
impl TokenIssuer for InMemoryTokenIssuer {
    async fn issue(&self, user_id: &UserId) -> Result<SessionToken, TokenStoreError> {
        let mut store = self.guard()?;
        let key = user_id.as_ref().to_owned();
        if let Some(existing) = store.by_user.get(&key) {
            debug!(
                user_id = %user_id,
                created = %existing.created,
                "reusing stored session token"
            );
            return Ok(existing.token.clone());
        }

        let token = SessionToken::generate();
        store.by_token.insert(token.as_str().to_owned(), key.clone());
        store.by_user.insert(
            key,
            IssuedToken {
                token: token.clone(),
                created: Utc::now(),
            },
        );
        info!(user_id = %user_id, token = %token.fingerprint(), "issued session token");
        Ok(token)
    }

    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, TokenStoreError> {
        let store = self.guard()?;
        let Some(raw_id) = store.by_token.get(token.as_str()) else {
            return Ok(None);
        };
        UserId::new(raw_id)
            .map(Some)
            .map_err(|_| TokenStoreError::storage("corrupt user id in token store"))
    }
}
