//! Uniform response body returned by every HTTP endpoint.

use serde::{Deserialize, Serialize};

use crate::catalog::ErrorCode;
use crate::error::ServiceError;

/// Outcome label carried in the `message` field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    #[serde(rename = "SUCCESS")]
    Success,
    #[serde(rename = "VALIDATION_FAILED")]
    ValidationFailed,
    #[serde(rename = "BAD_REQUEST")]
    BadRequest,
    #[serde(rename = "AUTHENTICATION_FAILED")]
    Unauthorized,
    #[serde(rename = "FORBIDDEN")]
    Forbidden,
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    #[serde(rename = "CONFLICT")]
    Conflict,
    #[serde(rename = "INTERNAL_SERVER_ERROR")]
    InternalServerError,
}

/// Error payload: period-joined messages plus a catalog code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub messages: String,
    #[serde(rename = "errorCode")]
    pub error_code: ErrorCode,
}

/// `{ success, message, error?, data? }`.
///
/// Only constructible through [`AppResponse::ok`] and [`AppResponse::failure`],
/// so exactly one of `error`/`data` is populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppResponse<T> {
    success: bool,
    message: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T> AppResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: MessageType::Success,
            error: None,
            data: Some(data),
        }
    }

    pub fn failure(err: &ServiceError) -> Self {
        Self {
            success: false,
            message: err.kind().message_type(),
            error: Some(err.detail()),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> MessageType {
        self.message
    }

    pub fn error(&self) -> Option<&ErrorDetail> {
        self.error.as_ref()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}
