//! Request DTOs and validation.
//!
//! Resource bodies are validated against the resource's column schema rather
//! than one struct per resource. All messages for a body are collected and
//! reported together as a single `validationFailed`.

use axum::Json;
use axum::extract::Query;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use serde::Deserialize;
use serde_json::{Map, Value};

use travelhub_core::{Column, ColumnKind, FieldSet, FieldValue, PageRequest, ResourceSpec, ServiceError, ServiceResult};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

/// `?limit=&offset=`, kept raw so malformed values read as absent.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> PageRequest {
        PageRequest::parse(self.limit.as_deref(), self.offset.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Unwrap a JSON body, turning extractor rejections into `badRequest`.
pub fn json_body(payload: Result<Json<Value>, JsonRejection>) -> ServiceResult<Value> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ServiceError::bad_request(rejection.body_text()))
}

/// Unwrap the paging query, turning extractor rejections into `badRequest`.
pub fn page_query(query: Result<Query<PageQuery>, QueryRejection>) -> ServiceResult<PageQuery> {
    query
        .map(|Query(query)| query)
        .map_err(|rejection| ServiceError::bad_request(rejection.body_text()))
}

pub fn parse_id(raw: &str) -> ServiceResult<i64> {
    raw.trim()
        .parse()
        .map_err(|_| ServiceError::validation_failed(["id must be a number string"]))
}

fn as_object(body: &Value) -> ServiceResult<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| ServiceError::bad_request("request body must be a JSON object"))
}

/// Validate a resource body into the column values it supplies.
///
/// Only writable columns are read; unknown fields are ignored.
pub fn parse_fields(spec: &'static ResourceSpec, body: &Value, mode: Mode) -> ServiceResult<FieldSet> {
    let object = as_object(body)?;
    let mut fields = FieldSet::new();
    let mut errors = Vec::new();

    for column in spec.columns.iter().filter(|c| c.writable) {
        match object.get(column.field) {
            None if mode == Mode::Create && column.required => errors.push(empty(column)),
            None => {}
            Some(Value::Null) if column.required => errors.push(empty(column)),
            Some(Value::Null) => fields.insert(column, FieldValue::Null),
            Some(value) => match coerce(column, value) {
                Ok(value) => fields.insert(column, value),
                Err(message) => errors.push(message),
            },
        }
    }

    if errors.is_empty() {
        Ok(fields)
    } else {
        Err(ServiceError::validation_failed(errors))
    }
}

pub fn parse_login(body: &Value) -> ServiceResult<LoginRequest> {
    let object = as_object(body)?;
    let mut errors = Vec::new();

    let mut string = |field: &str| match object.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::String(_)) | None | Some(Value::Null) => {
            errors.push(format!("{field} should not be empty"));
            None
        }
        Some(_) => {
            errors.push(format!("{field} must be a string"));
            None
        }
    };

    let username = string("username");
    let password = string("password");

    match (username, password) {
        (Some(username), Some(password)) => Ok(LoginRequest { username, password }),
        _ => Err(ServiceError::validation_failed(errors)),
    }
}

fn empty(column: &Column) -> String {
    format!("{} should not be empty", column.field)
}

fn coerce(column: &Column, value: &Value) -> Result<FieldValue, String> {
    let field = column.field;
    match column.kind {
        ColumnKind::Text => value
            .as_str()
            .map(FieldValue::text)
            .ok_or_else(|| format!("{field} must be a string")),
        ColumnKind::Integer => integer(value).ok_or_else(|| format!("{field} must be a number string")),
        ColumnKind::Float => float(value).ok_or_else(|| format!("{field} must be a number string")),
        ColumnKind::Boolean => match value {
            Value::Bool(b) => Ok(FieldValue::Bool(*b)),
            Value::String(s) if s == "true" => Ok(FieldValue::Bool(true)),
            Value::String(s) if s == "false" => Ok(FieldValue::Bool(false)),
            _ => Err(format!("{field} must be a boolean value")),
        },
        ColumnKind::OneOf(allowed) => match value.as_str() {
            Some(s) if allowed.contains(&s) => Ok(FieldValue::text(s)),
            _ => Err(format!(
                "{field} must be one of the following values: {}",
                allowed.join(", ")
            )),
        },
    }
}

fn integer(value: &Value) -> Option<FieldValue> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.map(FieldValue::Integer)
}

fn float(value: &Value) -> Option<FieldValue> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).map(FieldValue::Float)
}
