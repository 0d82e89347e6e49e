pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::state::AppState;
use crate::web::handlers;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handlers::handle_index).post(handlers::handle_upload))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
