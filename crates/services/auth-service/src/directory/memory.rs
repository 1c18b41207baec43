//! In-memory identity directory.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{StorageError, StorageResult};
use domain::{App, User};

use super::{AppProvider, UserProvider, UserSaver};

#[derive(Default)]
struct Inner {
    /// Users keyed by identifier
    users: HashMap<String, User>,
    /// Email -> user identifier
    emails: HashMap<String, String>,
    apps: HashMap<String, App>,
}

/// Directory backed by process memory.
///
/// Email uniqueness is enforced under a single write lock, so concurrent
/// registrations of the same email produce exactly one record.
#[derive(Default)]
pub struct InMemoryDirectory {
    inner: RwLock<Inner>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory with the given apps pre-provisioned.
    pub fn with_apps(apps: impl IntoIterator<Item = App>) -> Self {
        let inner = Inner {
            apps: apps.into_iter().map(|app| (app.id.clone(), app)).collect(),
            ..Inner::default()
        };
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Register or replace an app.
    pub async fn insert_app(&self, app: App) {
        self.inner.write().await.apps.insert(app.id.clone(), app);
    }

    /// Set the admin flag of an existing user.
    pub async fn set_admin(&self, user_id: &str, is_admin: bool) -> StorageResult<()> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .get_mut(user_id)
            .ok_or(StorageError::UserNotFound)?;
        user.is_admin = is_admin;
        Ok(())
    }

    /// Number of stored users.
    pub async fn user_count(&self) -> usize {
        self.inner.read().await.users.len()
    }
}

#[async_trait]
impl UserSaver for InMemoryDirectory {
    async fn save_user(&self, email: &str, pass_hash: &str) -> StorageResult<String> {
        let mut inner = self.inner.write().await;
        if inner.emails.contains_key(email) {
            return Err(StorageError::UserExists);
        }

        let user = User::new(email.to_string(), pass_hash.to_string());
        let id = user.id.clone();
        inner.emails.insert(user.email.clone(), id.clone());
        inner.users.insert(id.clone(), user);

        Ok(id)
    }
}

#[async_trait]
impl UserProvider for InMemoryDirectory {
    async fn user(&self, email: &str) -> StorageResult<User> {
        let inner = self.inner.read().await;
        inner
            .emails
            .get(email)
            .and_then(|id| inner.users.get(id))
            .cloned()
            .ok_or(StorageError::UserNotFound)
    }

    async fn is_admin(&self, user_id: &str) -> StorageResult<bool> {
        self.inner
            .read()
            .await
            .users
            .get(user_id)
            .map(|user| user.is_admin)
            .ok_or(StorageError::UserNotFound)
    }
}

#[async_trait]
impl AppProvider for InMemoryDirectory {
    async fn app(&self, app_id: &str) -> StorageResult<App> {
        self.inner
            .read()
            .await
            .apps
            .get(app_id)
            .cloned()
            .ok_or(StorageError::AppNotFound)
    }
}
