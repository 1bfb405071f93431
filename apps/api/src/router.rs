use std::sync::Arc;

use axum::{
    Json, Router,
    http::{header, Method},
    routing::get,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use agenda_cell::router::agenda_routes;
use agenda_cell::services::AvailabilityService;
use records_cell::router::records_routes;
use records_cell::services::RecordService;
use shared_database::SupabaseClient;

pub fn create_router(supabase: Arc<SupabaseClient>) -> Router {
    let availability = Arc::new(AvailabilityService::new(supabase.clone()));
    let records = Arc::new(RecordService::new(supabase));

    Router::new()
        .route("/", get(status))
        .merge(agenda_routes(availability))
        .nest("/records", records_routes(records))
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn status() -> Json<Value> {
    Json(json!({ "status": "Clinic agenda API is online." }))
}
