//! Authentication service - Credential checks, token issuance, registration
//! and privilege lookup.
//!
//! Stateless orchestrator over the identity directory. Every storage fault is
//! either mapped to a domain kind or returned as `DomainError::Internal`;
//! nothing is retried here.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use common::StorageError;
use domain::{DomainError, DomainResult, Password};

use crate::directory::{AppProvider, UserProvider, UserSaver};
use crate::service::token;

#[cfg(test)]
use mockall::automock;

/// Verified against when the email is unknown, so that a miss costs the
/// same as a wrong password.
static DUMMY_PASSWORD: Lazy<Option<Password>> =
    Lazy::new(|| Password::new("dummy-password-for-timing").ok());

/// Authentication service trait for dependency injection.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Verify credentials and return a token for `app_id`
    async fn login(&self, email: &str, password: &str, app_id: &str) -> DomainResult<String>;

    /// Register a new user and return its identifier
    async fn register_new_user(&self, email: &str, password: &str) -> DomainResult<String>;

    /// Read the admin flag of a user
    async fn is_admin(&self, user_id: &str) -> DomainResult<bool>;
}

/// Concrete implementation of AuthService over the directory capabilities.
pub struct Authenticator {
    user_saver: Arc<dyn UserSaver>,
    user_provider: Arc<dyn UserProvider>,
    app_provider: Arc<dyn AppProvider>,
    token_ttl: Duration,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(
        user_saver: Arc<dyn UserSaver>,
        user_provider: Arc<dyn UserProvider>,
        app_provider: Arc<dyn AppProvider>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            user_saver,
            user_provider,
            app_provider,
            token_ttl,
        }
    }

    /// Build a service whose three capabilities come from one directory.
    pub fn from_directory<D>(directory: Arc<D>, token_ttl: Duration) -> Self
    where
        D: UserSaver + UserProvider + AppProvider + 'static,
    {
        Self::new(directory.clone(), directory.clone(), directory, token_ttl)
    }
}

/// Run a CPU-bound password operation on the blocking pool.
async fn run_blocking<T, F>(f: F) -> DomainResult<T>
where
    F: FnOnce() -> DomainResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| DomainError::internal(format!("password task failed: {}", e)))?
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, email: &str, password: &str, app_id: &str) -> DomainResult<String> {
        const OP: &str = "auth.login";
        info!(op = OP, email, app_id, "attempting to login user");

        let user = match self.user_provider.user(email).await {
            Ok(user) => Some(user),
            Err(StorageError::UserNotFound) => None,
            Err(e) => {
                error!(op = OP, error = %e, "failed to get user");
                return Err(e.into());
            }
        };

        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let plain = password.to_owned();
        let password_valid = run_blocking(move || match stored_hash {
            Some(hash) => Password::from_hash(hash).verify(&plain),
            None => {
                if let Some(dummy) = DUMMY_PASSWORD.as_ref() {
                    let _ = dummy.verify(&plain);
                }
                Ok(false)
            }
        })
        .await;

        let user = match (user, password_valid) {
            (Some(user), Ok(true)) => user,
            (None, _) => {
                warn!(op = OP, email, "user not found");
                return Err(DomainError::InvalidCredentials);
            }
            (Some(_), Ok(false)) => {
                info!(op = OP, email, "invalid credentials");
                return Err(DomainError::InvalidCredentials);
            }
            (Some(_), Err(e)) => {
                error!(op = OP, email, error = ?e, "failed to verify password");
                return Err(e);
            }
        };

        let app = self.app_provider.app(app_id).await.map_err(|e| {
            warn!(op = OP, app_id, error = %e, "failed to resolve app");
            DomainError::from(e)
        })?;

        let token = token::new_token(&user, &app, self.token_ttl).map_err(|e| {
            error!(op = OP, app_id, error = ?e, "failed to generate token");
            e
        })?;

        info!(op = OP, user_id = %user.id, app_id, "user logged in successfully");

        Ok(token)
    }

    async fn register_new_user(&self, email: &str, password: &str) -> DomainResult<String> {
        const OP: &str = "auth.register_new_user";
        info!(op = OP, email, "registering user");

        let plain = password.to_owned();
        let password_hash = run_blocking(move || Password::new(&plain))
            .await
            .map_err(|e| {
                error!(op = OP, error = ?e, "failed to hash password");
                e
            })?
            .into_string();

        let user_id = match self.user_saver.save_user(email, &password_hash).await {
            Ok(id) => id,
            Err(StorageError::UserExists) => {
                warn!(op = OP, email, "user already exists");
                return Err(DomainError::UserExists);
            }
            Err(e) => {
                error!(op = OP, error = %e, "failed to save user");
                return Err(e.into());
            }
        };

        info!(op = OP, user_id = %user_id, "user registered");

        Ok(user_id)
    }

    async fn is_admin(&self, user_id: &str) -> DomainResult<bool> {
        const OP: &str = "auth.is_admin";
        info!(op = OP, user_id, "checking admin rights");

        let is_admin = self.user_provider.is_admin(user_id).await.map_err(|e| {
            match e {
                StorageError::UserNotFound => warn!(op = OP, user_id, "user not found"),
                ref other => error!(op = OP, error = %other, "failed to read admin flag"),
            }
            DomainError::from(e)
        })?;

        info!(op = OP, user_id, is_admin, "checked admin rights");

        Ok(is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{MockAppProvider, MockUserProvider, MockUserSaver};
    use domain::{App, User};
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    const TTL: Duration = Duration::from_secs(3600);

    fn stored_user(password: &str) -> User {
        User {
            id: "user-1".to_string(),
            email: "a@example.com".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            is_admin: false,
        }
    }

    fn service(
        saver: MockUserSaver,
        provider: MockUserProvider,
        apps: MockAppProvider,
    ) -> Authenticator {
        Authenticator::new(Arc::new(saver), Arc::new(provider), Arc::new(apps), TTL)
    }

    #[tokio::test]
    async fn test_login_success_issues_token_for_app() {
        let user = stored_user("Secret123!");
        let mut provider = MockUserProvider::new();
        provider
            .expect_user()
            .with(eq("a@example.com"))
            .returning(move |_| Ok(user.clone()));
        let mut apps = MockAppProvider::new();
        apps.expect_app()
            .with(eq("app-1"))
            .returning(|_| Ok(App::new("app-1", "Test", "test-secret")));

        let auth = service(MockUserSaver::new(), provider, apps);
        let token = assert_ok!(auth.login("a@example.com", "Secret123!", "app-1").await);

        let claims = token::parse_token(&token, b"test-secret").unwrap();
        assert_eq!(claims.uid, "user-1");
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.app_id, "app-1");
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_are_indistinguishable() {
        let user = stored_user("Secret123!");
        let mut provider = MockUserProvider::new();
        provider
            .expect_user()
            .with(eq("a@example.com"))
            .returning(move |_| Ok(user.clone()));
        provider
            .expect_user()
            .with(eq("ghost@example.com"))
            .returning(|_| Err(StorageError::UserNotFound));
        let mut apps = MockAppProvider::new();
        apps.expect_app().never();

        let auth = service(MockUserSaver::new(), provider, apps);
        let wrong_password = assert_err!(auth.login("a@example.com", "wrong", "app-1").await);
        let unknown_email = assert_err!(auth.login("ghost@example.com", "Secret123!", "app-1").await);

        assert_eq!(wrong_password, DomainError::InvalidCredentials);
        assert_eq!(wrong_password, unknown_email);
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_login_unknown_app() {
        let user = stored_user("Secret123!");
        let mut provider = MockUserProvider::new();
        provider.expect_user().returning(move |_| Ok(user.clone()));
        let mut apps = MockAppProvider::new();
        apps.expect_app().returning(|_| Err(StorageError::AppNotFound));

        let auth = service(MockUserSaver::new(), provider, apps);
        let err = auth.login("a@example.com", "Secret123!", "missing").await;

        assert_eq!(err, Err(DomainError::AppNotFound));
    }

    #[tokio::test]
    async fn test_login_directory_fault_is_internal() {
        let mut provider = MockUserProvider::new();
        provider
            .expect_user()
            .returning(|_| Err(StorageError::unavailable("connection reset")));

        let auth = service(MockUserSaver::new(), provider, MockAppProvider::new());
        let err = auth.login("a@example.com", "Secret123!", "app-1").await.unwrap_err();

        assert!(matches!(err, DomainError::Internal(_)));
        assert_eq!(err.to_string(), "internal error");
    }

    #[tokio::test]
    async fn test_login_corrupt_hash_is_internal() {
        let mut provider = MockUserProvider::new();
        provider.expect_user().returning(|_| {
            Ok(User {
                id: "user-1".to_string(),
                email: "a@example.com".to_string(),
                password_hash: "plaintext?".to_string(),
                is_admin: false,
            })
        });

        let auth = service(MockUserSaver::new(), provider, MockAppProvider::new());
        let err = auth.login("a@example.com", "plaintext?", "app-1").await;

        assert!(matches!(err, Err(DomainError::Internal(_))));
    }

    #[tokio::test]
    async fn test_login_signing_failure_is_internal() {
        let user = stored_user("Secret123!");
        let mut provider = MockUserProvider::new();
        provider.expect_user().returning(move |_| Ok(user.clone()));
        let mut apps = MockAppProvider::new();
        apps.expect_app()
            .returning(|_| Ok(App::new("app-1", "Broken", "")));

        let auth = service(MockUserSaver::new(), provider, apps);
        let err = auth.login("a@example.com", "Secret123!", "app-1").await;

        assert!(matches!(err, Err(DomainError::Internal(_))));
    }

    #[tokio::test]
    async fn test_register_stores_salted_hash() {
        let mut saver = MockUserSaver::new();
        saver
            .expect_save_user()
            .withf(|email, hash| {
                email == "a@example.com"
                    && hash.starts_with("$argon2id$")
                    && Password::from_hash(hash).verify("Secret123!").unwrap_or(false)
            })
            .times(1)
            .returning(|_, _| Ok("user-1".to_string()));

        let auth = service(saver, MockUserProvider::new(), MockAppProvider::new());
        let id = auth.register_new_user("a@example.com", "Secret123!").await;

        assert_eq!(id, Ok("user-1".to_string()));
    }

    #[tokio::test]
    async fn test_register_existing_email() {
        let mut saver = MockUserSaver::new();
        saver
            .expect_save_user()
            .returning(|_, _| Err(StorageError::UserExists));

        let auth = service(saver, MockUserProvider::new(), MockAppProvider::new());
        let err = auth.register_new_user("a@example.com", "Secret123!").await;

        assert_eq!(err, Err(DomainError::UserExists));
    }

    #[tokio::test]
    async fn test_register_directory_fault_is_internal() {
        let mut saver = MockUserSaver::new();
        saver
            .expect_save_user()
            .returning(|_, _| Err(StorageError::unavailable("disk full")));

        let auth = service(saver, MockUserProvider::new(), MockAppProvider::new());
        let err = auth.register_new_user("a@example.com", "Secret123!").await;

        assert!(matches!(err, Err(DomainError::Internal(_))));
    }

    #[tokio::test]
    async fn test_is_admin_returns_stored_flag() {
        let mut provider = MockUserProvider::new();
        provider
            .expect_is_admin()
            .with(eq("admin-1"))
            .returning(|_| Ok(true));
        provider
            .expect_is_admin()
            .with(eq("user-1"))
            .returning(|_| Ok(false));

        let auth = service(MockUserSaver::new(), provider, MockAppProvider::new());

        assert_eq!(auth.is_admin("admin-1").await, Ok(true));
        assert_eq!(auth.is_admin("user-1").await, Ok(false));
    }

    #[tokio::test]
    async fn test_is_admin_errors() {
        let mut provider = MockUserProvider::new();
        provider
            .expect_is_admin()
            .with(eq("ghost"))
            .returning(|_| Err(StorageError::UserNotFound));
        provider
            .expect_is_admin()
            .with(eq("user-1"))
            .returning(|_| Err(StorageError::unavailable("timeout")));

        let auth = service(MockUserSaver::new(), provider, MockAppProvider::new());

        assert_eq!(auth.is_admin("ghost").await, Err(DomainError::UserNotFound));
        assert!(matches!(
            auth.is_admin("user-1").await,
            Err(DomainError::Internal(_))
        ));
    }
}
