use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::Instrument;
use uuid::Uuid;

use travelhub_auth::JwtValidator;
use travelhub_core::catalog::messages;
use travelhub_core::{ErrorCode, ServiceError};

use crate::app::errors::ApiError;
use crate::context::AuthenticatedUser;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct AuthState {
    pub jwt: Arc<dyn JwtValidator>,
}

/// Require a valid `Authorization: Bearer <token>` header.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(req.headers()).ok_or_else(|| {
        ServiceError::unauthorized(messages::MISSING_JWT_TOKEN, ErrorCode::MISSING_JWT_TOKEN)
    })?;

    let claims = state.jwt.validate(token, Utc::now()).map_err(|e| {
        tracing::debug!(error = %e, "bearer token rejected");
        ServiceError::unauthorized(messages::INVALID_JWT_TOKEN, ErrorCode::JWT_VALIDATION_ERROR)
    })?;

    let user_id = claims.user_id().map_err(|_| {
        ServiceError::unauthorized(messages::INVALID_JWT_TOKEN, ErrorCode::JWT_VALIDATION_ERROR)
    })?;

    req.extensions_mut()
        .insert(AuthenticatedUser::new(user_id, claims.username, claims.role));

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let token = header.to_str().ok()?.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

/// One span and one log line per request, tagged with a fresh request id.
pub async fn request_log(req: Request, next: Next) -> Response {
    let request_id = Uuid::now_v7();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let span = tracing::info_span!("request", %request_id, %method, %path);

    async move {
        let started = Instant::now();
        let mut response = next.run(req).await;
        let latency_ms = started.elapsed().as_millis() as u64;
        let status = response.status().as_u16();

        if response.status().is_server_error() {
            tracing::warn!(status, latency_ms, "request completed");
        } else {
            tracing::info!(status, latency_ms, "request completed");
        }

        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}
