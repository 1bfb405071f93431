use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::{parse_record_id, RecordKind};
use crate::services::records::RecordService;

#[axum::debug_handler]
pub async fn list_records(
    State(service): State<Arc<RecordService>>,
    Path(kind): Path<String>,
) -> Result<Json<Value>, AppError> {
    let kind: RecordKind = kind.parse()?;
    let rows = service.list(kind).await?;

    Ok(Json(Value::Array(rows)))
}

#[axum::debug_handler]
pub async fn get_record(
    State(service): State<Arc<RecordService>>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let kind: RecordKind = kind.parse()?;
    let id = parse_record_id(&id)?;

    let row = service.get(kind, id).await?;
    Ok(Json(row))
}

#[axum::debug_handler]
pub async fn create_record(
    State(service): State<Arc<RecordService>>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let kind: RecordKind = kind.parse()?;
    let id = service.create(kind, body).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Record created successfully.",
            "id": id
        })),
    ))
}

#[axum::debug_handler]
pub async fn update_record(
    State(service): State<Arc<RecordService>>,
    Path((kind, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let kind: RecordKind = kind.parse()?;
    let id = parse_record_id(&id)?;

    let updated_rows = service.update(kind, id, body).await?;

    Ok(Json(json!({
        "message": "Record updated successfully.",
        "updated_rows": updated_rows
    })))
}

#[axum::debug_handler]
pub async fn delete_record(
    State(service): State<Arc<RecordService>>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let kind: RecordKind = kind.parse()?;
    let id = parse_record_id(&id)?;

    let deleted_rows = service.delete(kind, id).await?;

    Ok(Json(json!({
        "message": "Record deleted successfully.",
        "deleted_rows": deleted_rows
    })))
}
