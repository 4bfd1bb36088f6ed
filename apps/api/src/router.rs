use std::sync::Arc;

use axum::{routing::get, Router};

use professional_cell::router::professional_routes;
use scheduling_cell::router::scheduling_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Teleconsult API is running!" }))
        .nest("/professionals", professional_routes(state.clone()))
        .merge(scheduling_routes(state))
}
