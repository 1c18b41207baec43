//! Storage-level error handling.
//!
//! Directory adapters (in-memory, SeaORM) report failures with
//! [`StorageError`]. Engine-specific conditions such as a uniqueness
//! violation are translated into the sentinel variants at the adapter, so
//! the service layer never sees driver error types.

use domain::DomainError;
use thiserror::Error;

/// Errors reported by an identity directory backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("user already exists")]
    UserExists,

    #[error("user not found")]
    UserNotFound,

    #[error("app not found")]
    AppNotFound,

    #[cfg(feature = "database")]
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Any other backend fault (connection lost, lock poisoned, ...)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        StorageError::Unavailable(msg.into())
    }
}

/// Result type alias
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::UserExists => DomainError::UserExists,
            StorageError::UserNotFound => DomainError::UserNotFound,
            StorageError::AppNotFound => DomainError::AppNotFound,
            other => DomainError::Internal(other.to_string()),
        }
    }
}
