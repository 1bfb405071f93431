use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use crate::handlers;
use crate::services::availability::AvailabilityService;

pub fn agenda_routes(service: Arc<AvailabilityService>) -> Router {
    Router::new()
        .route("/available-slots", get(handlers::get_available_slots))
        .with_state(service)
}
