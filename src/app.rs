use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/view", get(handlers::get_view))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/regions", get(handlers::get_regions))
        .with_state(state)
}
