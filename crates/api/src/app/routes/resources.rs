//! Generic CRUD controller, mounted once per resource.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    routing::get,
};
use serde_json::{Value, json};

use travelhub_infra::ResourceService;

use crate::app::dto::{self, Mode, PageQuery};
use crate::app::errors::{self, ApiResult};

type Service = Arc<dyn ResourceService>;

pub fn router(service: Service) -> Router {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(find_one).post(update).put(update).delete(delete))
        .with_state(service)
}

pub async fn create(State(service): State<Service>, payload: Result<Json<Value>, JsonRejection>) -> ApiResult {
    let spec = service.spec();
    let body = dto::json_body(payload)?;
    let input = dto::parse_fields(spec, &body, Mode::Create)?;

    let record = service.create(input).await?;
    Ok(errors::created(record.to_json(spec)))
}

pub async fn list(
    State(service): State<Service>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult {
    let spec = service.spec();
    let query = dto::page_query(query)?;
    let page = service.find_all(query.page()).await?;
    Ok(errors::ok(page.map(|record| record.to_json(spec))))
}

/// Absent rows are a success with `data: null`.
pub async fn find_one(State(service): State<Service>, Path(id): Path<String>) -> ApiResult {
    let id = dto::parse_id(&id)?;
    let record = service.find_one(id).await?;
    Ok(errors::ok(record.map_or(Value::Null, |r| r.to_json(service.spec()))))
}

pub async fn update(
    State(service): State<Service>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult {
    let id = dto::parse_id(&id)?;
    let body = dto::json_body(payload)?;
    let changes = dto::parse_fields(service.spec(), &body, Mode::Update)?;

    service.update(id, changes).await?;
    Ok(errors::ok(json!({})))
}

pub async fn delete(State(service): State<Service>, Path(id): Path<String>) -> ApiResult {
    let id = dto::parse_id(&id)?;
    service.delete(id).await?;
    Ok(errors::ok(json!({})))
}
