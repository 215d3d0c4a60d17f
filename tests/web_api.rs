// HTTP API tests: the router driven in-process with tower's oneshot.
#![cfg(feature = "web")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use sentiscope::analysis::{Analyzer, AnalyzerOptions};
use sentiscope::config::Config;
use sentiscope::records::sample::SampleSource;
use sentiscope::records::RecordSource;
use sentiscope::sentiment::scorer::SentimentScorer;
use sentiscope::web::{build_router, AppState};

fn app_with(source: Arc<dyn RecordSource>) -> Router {
    let analyzer = Analyzer::new(source, SentimentScorer::default(), AnalyzerOptions::default());
    build_router(AppState::new(analyzer, Config::default()))
}

fn app() -> Router {
    app_with(Arc::new(SampleSource::seeded(1)))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// ============================================================
// Health and catalog
// ============================================================

#[tokio::test]
async fn health_routes_report_healthy() {
    for uri in ["/health", "/api/health"] {
        let response = app().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
    }
}

#[tokio::test]
async fn topics_route_lists_catalog() {
    let response = app().oneshot(get("/api/topics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let topics = json.as_array().unwrap();
    assert_eq!(topics.len(), 8);
    assert!(topics[0]["name"].is_string());
    assert!(topics[0]["icon"].is_string());
}

// ============================================================
// Analyze and data
// ============================================================

#[tokio::test]
async fn data_is_404_before_any_analysis() {
    let response = app().oneshot(get("/api/data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn analyze_then_fetch_data() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json("/api/analyze", r#"{"topic": "AI", "max_tweets": 40}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let result = body_json(response).await;
    assert_eq!(result["topic"], "AI");
    assert_eq!(result["total_count"], 40);
    assert!(result["distribution"]["positive"].is_u64());
    assert!(result["distribution"]["negative"].is_u64());
    assert!(result["distribution"]["neutral"].is_u64());
    assert_eq!(result["suggestions"].as_array().unwrap().len(), 5);
    assert!(result["highlights"]["positive"].is_array());

    let response = app.oneshot(get("/api/data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stored = body_json(response).await;
    assert_eq!(stored["version"], 1);
    assert_eq!(stored["result"]["topic"], "AI");
    assert_eq!(stored["records"].as_array().unwrap().len(), 40);
    assert!(stored["records"][0]["cleaned_text"].is_string());
    assert!(stored["records"][0]["sentiment_label"].is_string());
}

#[tokio::test]
async fn analyze_without_topic_is_400() {
    let response = app()
        .oneshot(post_json("/api/analyze", r#"{"max_records": 10}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn analyze_with_malformed_body_is_400() {
    let response = app()
        .oneshot(post_json("/api/analyze", "{not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_with_zero_max_records_is_400() {
    let response = app()
        .oneshot(post_json("/api/analyze", r#"{"topic": "AI", "max_records": 0}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_with_huge_max_records_is_400() {
    let response = app()
        .oneshot(post_json(
            "/api/analyze",
            r#"{"topic": "AI", "max_records": 10000000000000}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("at most"));
}

#[tokio::test]
async fn analyze_with_no_matching_records_is_404() {
    let csv = write_empty_csv();
    let empty = app_with(Arc::new(sentiscope::records::csv::CsvSource::new(
        csv.to_path_buf(),
    )));
    let response = empty
        .oneshot(post_json("/api/analyze", r#"{"topic": "AI"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analyze_with_failing_source_is_500() {
    let missing = app_with(Arc::new(sentiscope::records::csv::CsvSource::new(
        "/nonexistent/records.csv",
    )));
    let response = missing
        .oneshot(post_json("/api/analyze", r#"{"topic": "AI"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].is_string());
}

fn write_empty_csv() -> tempfile::TempPath {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "id,content\n1,nothing relevant here\n").unwrap();
    file.into_temp_path()
}
