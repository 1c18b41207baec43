//! User and App domain entities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh opaque user identifier.
pub fn new_user_id() -> String {
    Uuid::new_v4().to_string()
}

/// User domain entity
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque identifier, assigned by the directory at creation
    pub id: String,
    /// Unique lookup key
    pub email: String,
    /// Argon2 PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
}

impl User {
    /// Create a new non-admin user with a freshly generated identifier
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: new_user_id(),
            email,
            password_hash,
            is_admin: false,
        }
    }
}

// Don't expose the hash in debug output
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

/// A registered client application allowed to obtain tokens.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct App {
    /// Caller-supplied identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Symmetric signing key. Only the token issuer reads it.
    pub secret: String,
}

impl App {
    pub fn new(id: impl Into<String>, name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            secret: secret.into(),
        }
    }

    /// Get the signing secret as bytes.
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("a@example.com".to_string(), "hash".to_string());

        assert!(!user.id.is_empty());
        assert!(!user.is_admin);
        assert!(Uuid::parse_str(&user.id).is_ok());
    }

    #[test]
    fn test_user_ids_are_unique() {
        assert_ne!(new_user_id(), new_user_id());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let user = User::new("a@example.com".to_string(), "$argon2id$secret".to_string());
        let app = App::new("app-1", "Test", "super-secret-key");

        let user_dbg = format!("{:?}", user);
        let app_dbg = format!("{:?}", app);

        assert!(!user_dbg.contains("$argon2id$secret"));
        assert!(!app_dbg.contains("super-secret-key"));
        assert!(app_dbg.contains("app-1"));
    }
}
