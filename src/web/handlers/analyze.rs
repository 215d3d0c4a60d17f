// POST /api/analyze: run a topic analysis synchronously.
//
// Body: {"topic": "AI", "max_records": 200}. `max_tweets` is accepted as
// an alias; the configured default applies when neither is given.
//
// 200 with the AnalysisResult on success, 400 for a bad request (including
// a max_records above the configured limit),
// 404 when no records were found and 500 when the source or scorer failed.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::warn;

use crate::analysis::AnalysisError;
use crate::web::{api_error, AppState};

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub topic: String,
    #[serde(default, alias = "max_tweets")]
    pub max_records: Option<usize>,
}

pub async fn analyze_topic(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return api_error(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    let max_records = request
        .max_records
        .unwrap_or(state.config.default_max_records);

    match state.analyzer.run_analysis(&request.topic, max_records).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => {
            if let AnalysisError::Upstream(source) = &err {
                warn!(error = %format!("{source:#}"), topic = %request.topic, "Analysis failed");
            }
            err.into_response()
        }
    }
}
