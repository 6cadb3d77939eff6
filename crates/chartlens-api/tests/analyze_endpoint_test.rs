//! Router-level tests for `POST /analyze`.
//!
//! Driven with `tower::ServiceExt::oneshot` against the real router, with
//! either a scripted analyzer or the real fallback client over a scripted
//! vision backend.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use chartlens_api::{build_router, AppState};
use chartlens_core::{AppConfig, MemoryAnalysisLog};
use chartlens_inference::mock::MockVisionBackend;
use chartlens_inference::{ChartAnalyzer, ModelFallbackClient};

// 1x1 transparent PNG
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Analyzer that returns a fixed string and records the path it was handed
/// along with whether that path existed at call time.
#[derive(Clone)]
struct ScriptedAnalyzer {
    result: String,
    seen: Arc<Mutex<Vec<(PathBuf, bool)>>>,
}

impl ScriptedAnalyzer {
    fn new(result: &str) -> Self {
        Self {
            result: result.to_string(),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn seen(&self) -> Vec<(PathBuf, bool)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChartAnalyzer for ScriptedAnalyzer {
    async fn analyze_path(&self, path: &Path) -> String {
        self.seen
            .lock()
            .unwrap()
            .push((path.to_path_buf(), path.exists()));
        self.result.clone()
    }
}

fn multipart_body(field_name: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field_name, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn analyze_request(field_name: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(field_name, filename, bytes)))
        .unwrap()
}

fn test_state(
    api_key: Option<&str>,
    screenshot_dir: &Path,
    analyzer: Arc<dyn ChartAnalyzer>,
) -> AppState {
    let config = AppConfig {
        api_key: api_key.map(|k| k.to_string()),
        screenshot_dir: screenshot_dir.to_path_buf(),
        ..AppConfig::default()
    };
    AppState {
        config: Arc::new(config),
        analyzer,
    }
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// `Screenshot YYYY-MM-DD HHMMSS.png`
fn assert_screenshot_name(name: &str) {
    assert!(name.starts_with("Screenshot "), "bad prefix: {}", name);
    assert!(name.ends_with(".png"), "bad suffix: {}", name);
    let stamp = &name["Screenshot ".len()..name.len() - ".png".len()];
    assert_eq!(stamp.len(), "2025-06-17 120645".len(), "bad stamp: {}", stamp);
    for (i, c) in stamp.chars().enumerate() {
        match i {
            4 | 7 => assert_eq!(c, '-', "bad stamp: {}", stamp),
            10 => assert_eq!(c, ' ', "bad stamp: {}", stamp),
            _ => assert!(c.is_ascii_digit(), "bad stamp: {}", stamp),
        }
    }
}

#[tokio::test]
async fn test_analyze_success_returns_result_and_screenshot() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = ScriptedAnalyzer::new("Patterns: none\nPrediction: STABLE");
    let state = test_state(Some("test-key"), dir.path(), Arc::new(analyzer.clone()));

    let response = build_router(state)
        .oneshot(analyze_request("file", "chart.jpg", TINY_PNG))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["result"], "Patterns: none\nPrediction: STABLE");

    let screenshot = json["screenshot"].as_str().unwrap();
    assert_screenshot_name(screenshot);

    // exactly one archival copy, byte-identical to the upload
    let archived = std::fs::read(dir.path().join(screenshot)).unwrap();
    assert_eq!(archived, TINY_PNG);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_temp_file_removed_after_request() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = ScriptedAnalyzer::new("ok");
    let state = test_state(Some("test-key"), dir.path(), Arc::new(analyzer.clone()));

    let response = build_router(state)
        .oneshot(analyze_request("file", "chart.jpg", TINY_PNG))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let seen = analyzer.seen();
    assert_eq!(seen.len(), 1);
    let (temp_path, existed_during_call) = &seen[0];
    assert!(existed_during_call, "temp file missing during analysis");
    assert!(!temp_path.exists(), "temp file survived the request");
    // temp file carried the upload's extension
    assert_eq!(temp_path.extension().unwrap(), "jpg");
}

#[tokio::test]
async fn test_missing_api_key_returns_500_without_invoking_analyzer() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = ScriptedAnalyzer::new("must not run");
    let state = test_state(None, dir.path(), Arc::new(analyzer.clone()));

    let response = build_router(state)
        .oneshot(analyze_request("file", "chart.png", TINY_PNG))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = json_body(response).await;
    assert_eq!(json["detail"], "GOOGLE_API_KEY not set in environment");
    assert!(analyzer.seen().is_empty());

    // the archival copy is written before the credential check
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[tokio::test]
async fn test_missing_file_field_returns_400() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = ScriptedAnalyzer::new("must not run");
    let state = test_state(Some("test-key"), dir.path(), Arc::new(analyzer.clone()));

    let response = build_router(state)
        .oneshot(analyze_request("image", "chart.png", TINY_PNG))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = json_body(response).await;
    assert_eq!(json["detail"], "multipart field 'file' is required");
    assert!(analyzer.seen().is_empty());
}

#[tokio::test]
async fn test_analysis_failure_still_returns_200() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer = ScriptedAnalyzer::new("Error: All models failed to analyze the image.");
    let state = test_state(Some("test-key"), dir.path(), Arc::new(analyzer));

    let response = build_router(state)
        .oneshot(analyze_request("file", "chart.png", TINY_PNG))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["result"], "Error: All models failed to analyze the image.");
}

/// End-to-end scenario: candidate 1 fails, candidate 2 answers, response
/// carries the text and the archival name, and the analysis log shows one
/// failure line followed by one success line.
#[tokio::test]
async fn test_scenario_upload_with_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(
        MockVisionBackend::new()
            .with_failure("gemini-1.5-flash", "model overloaded")
            .with_success("gemini-pro-vision", "Patterns: none\nPrediction: STABLE"),
    );
    let log = Arc::new(MemoryAnalysisLog::new());
    let analyzer = Arc::new(ModelFallbackClient::new(
        backend.clone(),
        vec![
            "gemini-1.5-flash".to_string(),
            "gemini-pro-vision".to_string(),
        ],
        log.clone(),
    ));
    let state = test_state(Some("test-key"), dir.path(), analyzer);

    let response = build_router(state)
        .oneshot(analyze_request("file", "chart.jpg", TINY_PNG))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["result"], "Patterns: none\nPrediction: STABLE");
    assert_screenshot_name(json["screenshot"].as_str().unwrap());

    assert_eq!(
        backend.calls(),
        vec![
            "gemini-1.5-flash".to_string(),
            "gemini-pro-vision".to_string()
        ]
    );
    let lines = log.lines();
    assert_eq!(lines[0], "Trying model: gemini-1.5-flash");
    assert!(lines[1].starts_with("Error with model gemini-1.5-flash:"));
    assert_eq!(lines[2], "Trying model: gemini-pro-vision");
    assert_eq!(lines[3], "Success with model: gemini-pro-vision");
    // nothing attempted after the success
    assert_eq!(lines.len(), 4);
}
