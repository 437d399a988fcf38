//! Health check endpoint handler.

use axum::{http::StatusCode, response::IntoResponse, Json};
use tracing::debug;

/// Handler for the health check endpoint.
///
/// Reports liveness of the gateway itself; no engine is contacted.
///
/// # HTTP Request
///
/// `GET /health`
pub async fn health_handler() -> impl IntoResponse {
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (StatusCode::OK, Json(health_response))
}
