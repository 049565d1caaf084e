//! Credential verification against stored accounts.
//!
//! All authentication failures collapse into one uniform error so responses
//! cannot be used to probe which emails exist. When no account matches, a
//! dummy hash verification runs anyway to keep the timing profile close to
//! the found-account path.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::credentials::Credentials;
use crate::domain::error::Error;
use crate::domain::password::{equalize_verification_work, verify_password};
use crate::domain::ports::UserRepository;
use crate::domain::user::User;

/// Checks login credentials against the user repository.
pub struct CredentialVerifier {
    users: Arc<dyn UserRepository>,
}

impl CredentialVerifier {
    /// Build the verifier over a user repository port.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Verify credentials and return the matching active account.
    ///
    /// The lookup uses the submitted email exactly as given; accounts are
    /// found under their stored normalized form only. Unknown email, wrong
    /// password, and inactive account all yield the same error.
    pub async fn verify(&self, credentials: &Credentials) -> Result<User, Error> {
        let user = match self.users.find_by_email(credentials.email()).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                equalize_verification_work(credentials.password());
                debug!("login rejected for unknown email");
                return Err(Error::unauthorized("invalid credentials"));
            }
            Err(err) => {
                error!(error = %err, "failed to load account for login");
                return Err(Error::internal("Internal server error"));
            }
        };

        let verified = verify_password(user.password(), credentials.password());
        if verified && user.is_active() {
            Ok(user)
        } else {
            debug!(user_id = %user.id(), "login rejected");
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::email::EmailAddress;
    use crate::domain::error::ErrorCode;
    use crate::domain::password::hash_password;
    use crate::domain::ports::{MockUserRepository, UserPersistenceError};
    use crate::domain::user::{DisplayName, UserId};

    fn verifier(users: MockUserRepository) -> CredentialVerifier {
        CredentialVerifier::new(Arc::new(users))
    }

    fn login(email: &str, password: &str) -> Credentials {
        Credentials::try_from_parts(email, password).expect("valid credentials")
    }

    #[fixture]
    fn resident() -> User {
        let email = EmailAddress::new("resident@example.com").expect("valid email");
        let name = DisplayName::new("Resident").expect("valid name");
        let digest = hash_password("testpass123").expect("hashing succeeds");
        User::new(UserId::random(), email, name, digest)
    }

    fn repository_with(user: User) -> MockUserRepository {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(move |email| {
                if email == user.email().as_ref() {
                    Ok(Some(user.clone()))
                } else {
                    Ok(None)
                }
            });
        users
    }

    #[rstest]
    #[tokio::test]
    async fn verify_accepts_matching_credentials(resident: User) {
        let expected_id = resident.id().clone();
        let users = repository_with(resident);

        let user = verifier(users)
            .verify(&login("resident@example.com", "testpass123"))
            .await
            .expect("credentials match");

        assert_eq!(user.id(), &expected_id);
    }

    #[rstest]
    #[case::unknown_email("stranger@example.com", "testpass123")]
    #[case::wrong_password("resident@example.com", "wrongpass")]
    #[tokio::test]
    async fn verify_rejects_uniformly(
        resident: User,
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let users = repository_with(resident);

        let err = verifier(users)
            .verify(&login(email, password))
            .await
            .expect_err("credentials are rejected");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid credentials");
    }

    #[rstest]
    #[tokio::test]
    async fn verify_rejects_inactive_account(mut resident: User) {
        resident.deactivate();
        let users = repository_with(resident);

        let err = verifier(users)
            .verify(&login("resident@example.com", "testpass123"))
            .await
            .expect_err("inactive accounts cannot log in");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid credentials");
    }

    #[rstest]
    #[tokio::test]
    async fn verify_requires_exact_email_match(resident: User) {
        // Stored form is normalized; an uppercase domain must not match.
        let users = repository_with(resident);

        let err = verifier(users)
            .verify(&login("resident@EXAMPLE.COM", "testpass123"))
            .await
            .expect_err("lookup is byte-exact");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn verify_maps_repository_failure_to_internal() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Err(UserPersistenceError::connection("store offline")));

        let err = verifier(users)
            .verify(&login("resident@example.com", "testpass123"))
            .await
            .expect_err("repository failure surfaces");

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), "Internal server error");
    }
}
