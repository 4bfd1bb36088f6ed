use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn professional_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/{professional_id}",
            get(handlers::get_professional).put(handlers::update_professional),
        )
        .route(
            "/{professional_id}/availability",
            get(handlers::get_availability).put(handlers::set_availability),
        )
        .with_state(state)
}
