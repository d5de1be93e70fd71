//! Service error model.

use thiserror::Error;

use crate::catalog::ErrorCode;
use crate::response::{ErrorDetail, MessageType};

/// Result type returned by every service operation.
///
/// `Ok` carries the payload and `Err` the classified failure, so a service
/// outcome can never hold both or neither.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error taxonomy shared by all resources.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,
    ValidationFailed,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    InternalServerError,
}

impl ErrorKind {
    /// HTTP status implied by the kind.
    pub const fn status(self) -> u16 {
        match self {
            ErrorKind::BadRequest | ErrorKind::ValidationFailed => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::InternalServerError => 500,
        }
    }

    pub const fn message_type(self) -> MessageType {
        match self {
            ErrorKind::BadRequest => MessageType::BadRequest,
            ErrorKind::ValidationFailed => MessageType::ValidationFailed,
            ErrorKind::Unauthorized => MessageType::Unauthorized,
            ErrorKind::Forbidden => MessageType::Forbidden,
            ErrorKind::NotFound => MessageType::NotFound,
            ErrorKind::Conflict => MessageType::Conflict,
            ErrorKind::InternalServerError => MessageType::InternalServerError,
        }
    }

    /// Code used when the caller does not supply a catalog code.
    pub const fn default_code(self) -> ErrorCode {
        ErrorCode::new(self.status() as u32)
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ErrorKind::BadRequest => "bad request",
            ErrorKind::ValidationFailed => "validation failed",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::InternalServerError => "internal server error",
        };
        f.write_str(name)
    }
}

/// A classified failure: kind, period-joined messages and a catalog code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind}: {messages} (code {code})")]
pub struct ServiceError {
    kind: ErrorKind,
    messages: String,
    code: ErrorCode,
}

impl ServiceError {
    /// Build an error from a list of messages (joined with `". "`).
    pub fn new<I, S>(kind: ErrorKind, messages: I, code: Option<ErrorCode>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let messages = messages
            .into_iter()
            .map(Into::into)
            .collect::<Vec<String>>()
            .join(". ");

        Self {
            kind,
            messages,
            code: code.unwrap_or(kind.default_code()),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, [msg], None)
    }

    pub fn validation_failed<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ErrorKind::ValidationFailed, messages, Some(ErrorCode::VALIDATION_ERROR))
    }

    pub fn unauthorized(msg: impl Into<String>, code: ErrorCode) -> Self {
        Self::new(ErrorKind::Unauthorized, [msg], Some(code))
    }

    pub fn not_found(msg: impl Into<String>, code: ErrorCode) -> Self {
        Self::new(ErrorKind::NotFound, [msg], Some(code))
    }

    pub fn conflict(msg: impl Into<String>, code: ErrorCode) -> Self {
        Self::new(ErrorKind::Conflict, [msg], Some(code))
    }

    pub fn internal(msg: impl Into<String>, code: ErrorCode) -> Self {
        Self::new(ErrorKind::InternalServerError, [msg], Some(code))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn messages(&self) -> &str {
        &self.messages
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn status(&self) -> u16 {
        self.kind.status()
    }

    pub fn detail(&self) -> ErrorDetail {
        ErrorDetail {
            messages: self.messages.clone(),
            error_code: self.code,
        }
    }
}
