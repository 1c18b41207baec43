//! Authentication service business logic.

mod auth_service;
pub mod token;

pub use auth_service::{AuthService, Authenticator};
pub use token::{new_token, parse_token, Claims};

#[cfg(test)]
pub use auth_service::MockAuthService;
