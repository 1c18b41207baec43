//! Identity directory capabilities required by the auth service.
//!
//! Each trait is one narrow capability so that a backend can be swapped
//! or faked per concern. Implementations translate their own failure
//! modes into [`StorageError`] sentinels.

mod memory;

use async_trait::async_trait;

use common::StorageResult;
use domain::{App, User};

#[cfg(test)]
use mockall::automock;

pub use memory::InMemoryDirectory;

/// Creates user records.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserSaver: Send + Sync {
    /// Persist a new user and return its generated identifier.
    ///
    /// Fails with `StorageError::UserExists` if the email is taken. The
    /// uniqueness check and the insert are atomic.
    async fn save_user(&self, email: &str, pass_hash: &str) -> StorageResult<String>;
}

/// Reads user records.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Find user by email
    async fn user(&self, email: &str) -> StorageResult<User>;

    /// Read the admin flag of a user by identifier
    async fn is_admin(&self, user_id: &str) -> StorageResult<bool>;
}

/// Reads registered client applications.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AppProvider: Send + Sync {
    /// Find app by identifier
    async fn app(&self, app_id: &str) -> StorageResult<App>;
}
