// GET /health, /api/health: liveness check for load balancers and the CLI.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Liveness check: always 200.
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "message": "Sentiment analysis API is running",
        })),
    )
}
