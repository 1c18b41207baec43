//! Domain-level errors.
//!
//! The closed set of failure kinds the identity core returns. They are
//! independent of transport (gRPC) and storage (SQL) representations, so a
//! transport adapter can expose them to callers without leaking detail.

use thiserror::Error;

/// Domain-specific errors returned by authentication operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Unknown email or wrong password. The two causes are never told apart.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration email is already taken
    #[error("user already exists")]
    UserExists,

    /// No user with the requested identifier
    #[error("user not found")]
    UserNotFound,

    /// The calling application is not registered
    #[error("invalid app id")]
    AppNotFound,

    /// Unexpected directory, hashing or signing fault.
    ///
    /// The detail is kept for operators (`Debug`, logs) and is not part of
    /// the displayed message.
    #[error("internal error")]
    Internal(String),
}

impl DomainError {
    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        DomainError::Internal(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
