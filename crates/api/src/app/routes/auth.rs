use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    extract::rejection::JsonRejection,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::app::dto;
use crate::app::errors::{self, ApiResult};
use crate::app::services::AppServices;
use crate::context::AuthenticatedUser;

/// Public routes, nested under `/auth`.
pub fn router() -> Router {
    Router::new().route("/login", post(login))
}

/// Routes behind the bearer check, with full paths.
pub fn protected_router() -> Router {
    Router::new().route("/auth/protected", get(protected))
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult {
    let body = dto::json_body(payload)?;
    let credentials = dto::parse_login(&body)?;

    let result = services
        .auth
        .login(&credentials.username, &credentials.password)
        .await?;
    Ok(errors::ok(result))
}

pub async fn protected(Extension(user): Extension<AuthenticatedUser>) -> ApiResult {
    let mut data = json!({
        "id": user.user_id(),
        "username": user.username(),
    });
    if let Some(role) = user.role() {
        data["role"] = json!(role.as_str());
    }
    Ok(errors::ok(data))
}
