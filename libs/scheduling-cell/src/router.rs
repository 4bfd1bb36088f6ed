use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn scheduling_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/professionals/{professional_id}/available-slots",
            get(handlers::get_available_slots),
        )
        .route(
            "/professionals/{professional_id}/available-days",
            get(handlers::get_available_days),
        )
        .route(
            "/professionals/{professional_id}/calendar-events",
            get(handlers::get_calendar_events),
        )
        .route(
            "/bookings",
            get(handlers::list_bookings).post(handlers::create_booking),
        )
        .with_state(state)
}
