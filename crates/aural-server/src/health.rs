use axum::Json;
use axum::response::IntoResponse;
use http::StatusCode;

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Service banner at the root path
pub async fn index_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "aural is running" }))
}
