//! Domain layer - Core identity entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Storage adapters and the transport layer translate into and out of these
//! types.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use user::{new_user_id, App, User};
