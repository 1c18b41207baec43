//! SSO service configuration.

use std::time::Duration;

use common::{env_parse, env_var, parse_duration, ConfigError, DatabaseConfig, Environment};
use domain::DEFAULT_TOKEN_TTL_SECS;

/// SSO service configuration.
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Deployment environment (log format and level)
    pub env: Environment,
    /// Identity directory storage
    pub database: DatabaseConfig,
    /// Validity of issued tokens
    pub token_ttl: Duration,
    /// Server-side deadline applied to every request
    pub request_timeout: Duration,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl AuthServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let env = env_parse(&["SSO_ENV"], defaults.env, |v| v.parse())?;
        let database = DatabaseConfig {
            url: env_var(&["SSO_STORAGE_URL", "DATABASE_URL"])
                .map(|(_, url)| url)
                .unwrap_or(defaults.database.url),
            ..defaults.database
        };
        let token_ttl = env_parse(&["SSO_TOKEN_TTL"], defaults.token_ttl, parse_duration)?;
        let request_timeout = env_parse(
            &["SSO_REQUEST_TIMEOUT"],
            defaults.request_timeout,
            parse_duration,
        )?;
        let host = env_var(&["SSO_HOST"])
            .map(|(_, host)| host)
            .unwrap_or(defaults.host);
        let port = env_parse(&["SSO_PORT"], defaults.port, |v| {
            v.parse::<u16>().map_err(|e| e.to_string())
        })?;

        Ok(Self {
            env,
            database,
            token_ttl,
            request_timeout,
            host,
            port,
        })
    }
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            env: Environment::Local,
            database: DatabaseConfig::default(),
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            request_timeout: Duration::from_secs(10),
            host: "0.0.0.0".to_string(),
            port: 44044,
        }
    }
}
