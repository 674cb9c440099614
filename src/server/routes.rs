use axum::{
    routing::{get, post},
    Router,
};

use crate::server::handlers;

/// Create the API router
pub fn api_router() -> Router {
    Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/score", post(handlers::score))
        .route("/update", post(handlers::update))
        .route("/extract", post(handlers::extract))
        .route("/stats", get(handlers::stats))
}
