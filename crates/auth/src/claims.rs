use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::roles::UserRole;

/// Session token claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject: the user id, as a string.
    pub sub: String,

    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,

    /// Issued-at (Unix timestamp).
    pub iat: i64,

    /// Expiration (Unix timestamp).
    pub exp: i64,
}

impl JwtClaims {
    pub fn new(
        user_id: i64,
        username: impl Into<String>,
        role: Option<UserRole>,
        issued_at: DateTime<Utc>,
        ttl_secs: i64,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: user_id.to_string(),
            username: username.into(),
            role,
            iat,
            exp: iat + ttl_secs,
        }
    }

    /// Numeric user id carried in `sub`.
    pub fn user_id(&self) -> Result<i64, AuthError> {
        self.sub
            .parse()
            .map_err(|_| AuthError::TokenInvalid(format!("non-numeric subject '{}'", self.sub)))
    }

    /// Check the `iat`/`exp` window against `now`.
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), AuthError> {
        let now = now.timestamp();
        if self.exp <= self.iat {
            return Err(AuthError::InvalidTimeWindow);
        }
        if now < self.iat {
            return Err(AuthError::TokenNotYetValid);
        }
        if now >= self.exp {
            return Err(AuthError::TokenExpired);
        }
        Ok(())
    }
}
