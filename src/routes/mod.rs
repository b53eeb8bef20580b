use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod health;

pub use health::{health, index};

/// Health-check backend: `GET /` and `GET /health`.
pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
