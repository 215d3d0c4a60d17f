// Web server: Axum JSON API in front of the analysis pipeline.
//
// Every route is public JSON. The only state shared between requests is
// the analyzer and its latest-analysis slot.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analysis::{AnalysisError, Analyzer};
use crate::config::Config;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(analyzer: Analyzer, config: Config) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            config: Arc::new(config),
        }
    }
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(state: AppState, port: u16, bind: &str) -> Result<()> {
    let source = state.analyzer.source_name();
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!(source = source, "Sentiment API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/health", get(handlers::health::health))
        .route("/api/analyze", post(handlers::analyze::analyze_topic))
        .route("/api/data", get(handlers::data::get_analysis_data))
        .route("/api/topics", get(handlers::topics::list_topics))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status = match &self {
            AnalysisError::Validation(_) => StatusCode::BAD_REQUEST,
            AnalysisError::Empty { .. } | AnalysisError::NotFound => StatusCode::NOT_FOUND,
            AnalysisError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        api_error(status, &self.to_string())
    }
}
