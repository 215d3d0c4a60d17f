// GET /api/data: the most recent analysis with its full scored batch.
//
// 404 until the first successful analysis.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::web::AppState;

pub async fn get_analysis_data(State(state): State<AppState>) -> Response {
    match state.analyzer.latest().await {
        Ok(stored) => Json(stored.as_ref().clone()).into_response(),
        Err(err) => err.into_response(),
    }
}
