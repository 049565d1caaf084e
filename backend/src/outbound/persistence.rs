//! In-memory user repository adapter.
//!
//! Purpose: back the [`UserRepository`] port with a process-local store
//! guarded by a mutex. The duplicate-email check and the insert happen under
//! a single lock acquisition, giving the same atomicity a relational unique
//! index would. Guards are released before any await point.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

#[derive(Default)]
struct UserStore {
    by_id: HashMap<String, User>,
    email_index: HashMap<String, String>,
}

/// Process-local [`UserRepository`] implementation.
///
/// Lookups by email are byte-exact against the stored normalized address;
/// the adapter performs no case folding of its own.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: Mutex<UserStore>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> Result<MutexGuard<'_, UserStore>, UserPersistenceError> {
        self.store
            .lock()
            .map_err(|_| UserPersistenceError::connection("user store mutex poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut store = self.guard()?;
        let email = user.email().as_ref().to_owned();
        if store.email_index.contains_key(&email) {
            return Err(UserPersistenceError::duplicate_email(email));
        }
        let id = user.id().as_ref().to_owned();
        store.email_index.insert(email, id.clone());
        store.by_id.insert(id, user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut store = self.guard()?;
        let id = user.id().as_ref().to_owned();
        let Some(existing) = store.by_id.get(&id) else {
            return Err(UserPersistenceError::query(format!(
                "no stored user with id {id}"
            )));
        };

        let previous_email = existing.email().as_ref().to_owned();
        let email = user.email().as_ref().to_owned();
        if previous_email != email {
            if store.email_index.contains_key(&email) {
                return Err(UserPersistenceError::duplicate_email(email));
            }
            store.email_index.remove(&previous_email);
            store.email_index.insert(email, id.clone());
        }
        store.by_id.insert(id, user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let store = self.guard()?;
        let Some(id) = store.email_index.get(email) else {
            return Ok(None);
        };
        Ok(store.by_id.get(id).cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let store = self.guard()?;
        Ok(store.by_id.get(id.as_ref()).cloned())
    }
}
