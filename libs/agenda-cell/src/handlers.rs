use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::error::AppError;

use crate::models::AvailabilityQueryParams;
use crate::services::availability::AvailabilityService;

/// `GET /available-slots?resource_id=&date=YYYY-MM-DD[&plan_id=][&procedure_id=]`
#[axum::debug_handler]
pub async fn get_available_slots(
    State(service): State<Arc<AvailabilityService>>,
    Query(params): Query<AvailabilityQueryParams>,
) -> Result<Json<Value>, AppError> {
    let slots = service.compute_available_slots(&params).await?;

    let slots: Vec<String> = slots
        .iter()
        .map(|time| time.format("%H:%M").to_string())
        .collect();

    Ok(Json(json!({
        "slots": slots,
        "total_slots": slots.len()
    })))
}
