//! Port abstraction for session token issuance and resolution.

use async_trait::async_trait;

use crate::domain::{SessionToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by token store adapters.
    pub enum TokenStoreError {
        /// The backing store could not complete the operation.
        Storage { message: String } => "token store failed: {message}",
    }
}

/// Driven port handing out and resolving opaque session tokens.
///
/// Issuance is get-or-create: a user holds at most one token, and repeated
/// calls return the same value until the store forgets it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Return the user's token, minting one on first issue.
    async fn issue(&self, user_id: &UserId) -> Result<SessionToken, TokenStoreError>;

    /// Resolve a presented token to the owning user, `None` when unknown.
    async fn resolve(&self, token: &SessionToken) -> Result<Option<UserId>, TokenStoreError>;
}
