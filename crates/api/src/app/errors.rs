//! Mapping of service outcomes onto HTTP responses.
//!
//! Every body, success or failure, is an `AppResponse`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use travelhub_core::{AppResponse, ServiceError};

/// A classified failure on its way out of a handler.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub ServiceError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.0.code().value(), error = %self.0, "request failed");
        } else {
            tracing::debug!(code = self.0.code().value(), error = %self.0, "request rejected");
        }
        (status, Json(AppResponse::<()>::failure(&self.0))).into_response()
    }
}

pub type ApiResult = Result<Response, ApiError>;

pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(AppResponse::ok(data))).into_response()
}

pub fn created<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(AppResponse::ok(data))).into_response()
}
