use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use crate::handlers;
use crate::services::records::RecordService;

pub fn records_routes(service: Arc<RecordService>) -> Router {
    Router::new()
        .route("/{kind}", get(handlers::list_records).post(handlers::create_record))
        .route(
            "/{kind}/{id}",
            get(handlers::get_record)
                .put(handlers::update_record)
                .delete(handlers::delete_record),
        )
        .with_state(service)
}
