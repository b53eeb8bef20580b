use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// GET / - Service banner
pub async fn index() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "name": "megagen-crm",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
