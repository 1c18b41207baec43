//! Shared configuration structures.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value {value:?}: {reason}")]
    Invalid {
        var: String,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn invalid(var: &str, value: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            var: var.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Deployment environment. Selects log format and verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Prod,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Local => write!(f, "local"),
            Environment::Dev => write!(f, "dev"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://sso.db?mode=rwc".to_string(),
            max_connections: 10,
            min_connections: 1,
        }
    }
}

/// Parse a duration such as `90s`, `15m`, `1h` or `2d`.
///
/// A bare number is taken as seconds. Zero is rejected.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let s = input.trim();
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);

    if digits.is_empty() {
        return Err("missing amount".to_string());
    }
    let amount: u64 = digits.parse().map_err(|e| format!("{}", e))?;

    let multiplier = match unit.trim() {
        "" | "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 86_400,
        other => return Err(format!("unknown unit '{}'", other)),
    };

    let secs = amount
        .checked_mul(multiplier)
        .ok_or_else(|| "duration overflows".to_string())?;
    if secs == 0 {
        return Err("duration must be positive".to_string());
    }

    Ok(Duration::from_secs(secs))
}

/// Read the first set variable among `names`.
pub fn env_var(names: &[&str]) -> Option<(String, String)> {
    names
        .iter()
        .find_map(|name| env::var(name).ok().map(|v| (name.to_string(), v)))
}

/// Read and parse the first set variable among `names`, or fall back to `default`.
pub fn env_parse<T, F>(names: &[&str], default: T, parse: F) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<T, String>,
{
    match env_var(names) {
        Some((var, value)) => parse(&value).map_err(|reason| ConfigError::invalid(&var, &value, reason)),
        None => Ok(default),
    }
}
