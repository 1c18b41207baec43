//! gRPC protocol buffer definitions.
//!
//! Generated service definitions for the SSO `AuthService`
//! (register, login, admin check).

/// Authentication service definitions.
pub mod auth {
    tonic::include_proto!("auth");
}

// Re-export commonly used items
pub use auth::auth_service_client::AuthServiceClient;
pub use auth::auth_service_server::{AuthService, AuthServiceServer};
