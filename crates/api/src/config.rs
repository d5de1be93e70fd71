//! Server configuration loaded from the environment.

use std::net::SocketAddr;

use travelhub_auth::JwtConfig;
use travelhub_infra::config::{ConfigError, DatabaseConfig, parse_var};

const DEV_JWT_SECRET: &str = "dev-secret";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// Postgres when set; otherwise the in-memory store.
    pub use_persistent_stores: bool,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = match lookup("JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET not set; using insecure dev default");
                DEV_JWT_SECRET.to_string()
            }
        };

        Ok(Self {
            bind_addr: parse_var(&lookup, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 8080)))?,
            use_persistent_stores: parse_var(&lookup, "USE_PERSISTENT_STORES", false)?,
            database: DatabaseConfig::from_lookup(&lookup)?,
            jwt: JwtConfig {
                secret,
                ttl_secs: parse_var(&lookup, "JWT_EXPIRES_IN_SECS", 3600)?,
            },
        })
    }
}
