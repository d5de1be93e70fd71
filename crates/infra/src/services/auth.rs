//! Credential validation and session token issuance.

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use travelhub_auth::{Hs256Jwt, UserRole, verify_password};
use travelhub_core::catalog::{USER, messages};
use travelhub_core::resources::USERS;
use travelhub_core::{ErrorCode, FieldValue, Record, ServiceError, ServiceResult};

use crate::services::users::{PASSWORD, SALT, USERNAME, UserService};

/// `{ token, user }` returned by a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub token: String,
    pub user: Value,
}

#[derive(Clone)]
pub struct AuthService {
    users: UserService,
    jwt: Hs256Jwt,
}

impl AuthService {
    pub fn new(users: UserService, jwt: Hs256Jwt) -> Self {
        Self { users, jwt }
    }

    /// Look the user up by username and check the password against the
    /// stored salted hash. On success the record comes back without its
    /// password and salt.
    #[instrument(skip(self, password))]
    pub async fn validate_credentials(&self, username: &str, password: &str) -> ServiceResult<Record> {
        let Some(mut record) = self.users.find_credentials(username).await? else {
            tracing::info!("login for unknown user");
            return Err(ServiceError::not_found(
                messages::USER_DOES_NOT_EXIST,
                ErrorCode::USER_DOES_NOT_EXIST,
            ));
        };

        let salt = record.get(SALT).and_then(FieldValue::as_text).unwrap_or_default();
        let hash = record.get(PASSWORD).and_then(FieldValue::as_text).unwrap_or_default();

        let matches = verify_password(password, salt, hash).map_err(|e| {
            tracing::error!(user_id = record.id, error = %e, "stored credentials unusable");
            ServiceError::internal(e.to_string(), USER.find_failed)
        })?;

        if !matches {
            tracing::info!(user_id = record.id, "login with invalid password");
            return Err(ServiceError::unauthorized(
                messages::INVALID_PASSWORD,
                ErrorCode::INVALID_PASSWORD,
            ));
        }

        record.fields.remove(PASSWORD);
        record.fields.remove(SALT);
        Ok(record)
    }

    /// Sign a token carrying the user's id and username.
    pub fn issue_token(&self, user: &Record) -> ServiceResult<LoginResult> {
        let username = user.get(USERNAME).and_then(FieldValue::as_text).unwrap_or_default();
        let role = user
            .get("role")
            .and_then(FieldValue::as_text)
            .and_then(|r| r.parse::<UserRole>().ok());

        let token = self.jwt.issue(user.id, username, role, Utc::now()).map_err(|e| {
            tracing::error!(user_id = user.id, error = %e, "token signing failed");
            ServiceError::internal(e.to_string(), ErrorCode::JWT_VALIDATION_ERROR)
        })?;

        Ok(LoginResult {
            token,
            user: user.to_json(&USERS),
        })
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> ServiceResult<LoginResult> {
        let user = self.validate_credentials(username, password).await?;
        let result = self.issue_token(&user)?;
        tracing::info!(user_id = user.id, "login succeeded");
        Ok(result)
    }
}
