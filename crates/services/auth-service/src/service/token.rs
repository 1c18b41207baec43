//! Token issuer - Builds and signs per-app access tokens.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use domain::{App, DomainError, DomainResult, User};

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub uid: String,
    pub email: String,
    pub app_id: String,
    /// Expiry as unix seconds
    pub exp: i64,
}

/// Mint an HS256 token for `user`, signed with the secret of `app`.
///
/// Expiry is the current time plus `ttl`. An empty secret is treated as
/// malformed key material and no token is produced.
pub fn new_token(user: &User, app: &App, ttl: Duration) -> DomainResult<String> {
    if app.secret.is_empty() {
        return Err(DomainError::internal(format!(
            "app {} has an empty signing secret",
            app.id
        )));
    }

    let ttl = chrono::Duration::from_std(ttl)
        .map_err(|e| DomainError::internal(format!("token ttl out of range: {}", e)))?;
    let expires_at = Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| DomainError::internal("token expiry overflows"))?;

    let claims = Claims {
        uid: user.id.clone(),
        email: user.email.clone(),
        app_id: app.id.clone(),
        exp: expires_at.timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(app.secret_bytes()),
    )
    .map_err(|e| DomainError::internal(format!("token signing failed: {}", e)))
}

/// Verify a token against an app secret and return its claims.
///
/// Only HS256 is accepted. Bad signatures, expired tokens and malformed
/// input all fail with `InvalidCredentials`.
pub fn parse_token(token: &str, secret: &[u8]) -> DomainResult<Claims> {
    let validation = Validation::new(Algorithm::HS256);

    decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|_| DomainError::InvalidCredentials)
}
