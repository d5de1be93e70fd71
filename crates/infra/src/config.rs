//! Database configuration loaded from the environment.

use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Read `var` through `lookup`, falling back to `default` when unset.
///
/// A set but unparsable value is an error, never silently defaulted.
pub fn parse_var<T, F>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

pub fn string_var<F>(lookup: &F, var: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var).unwrap_or_else(|| default.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host: string_var(&lookup, "POSTGRES_HOST", "localhost"),
            port: parse_var(&lookup, "POSTGRES_PORT", 5432)?,
            user: string_var(&lookup, "POSTGRES_USER", "postgres"),
            password: string_var(&lookup, "POSTGRES_PASSWORD", ""),
            database: string_var(&lookup, "POSTGRES_DB", "travelhub"),
            max_connections: parse_var(&lookup, "POSTGRES_MAX_CONNECTIONS", 10)?,
        })
    }
}
