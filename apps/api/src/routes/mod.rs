pub mod form;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs::handlers::handle_jobs;
use crate::matching::handlers::handle_analyze;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/health", get(health::health_handler))
        .route("/api/analyze", post(handle_analyze))
        .route("/api/jobs", post(handle_jobs))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
