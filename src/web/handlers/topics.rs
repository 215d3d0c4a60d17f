// GET /api/topics: the suggested topic catalog.

use axum::response::IntoResponse;
use axum::Json;

use crate::catalog::suggestion_topics;

pub async fn list_topics() -> impl IntoResponse {
    Json(suggestion_topics())
}
