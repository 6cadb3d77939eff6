//! Analysis HTTP handler.

use std::path::Path;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::{ApiError, AppState};

/// Response for a handled analysis, including analysis failures: those
/// return a 200 whose `result` carries an `"Error: ..."` string.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// Raw model output, or a failure-describing string.
    pub result: String,
    /// Filename of the archival screenshot copy.
    pub screenshot: String,
}

/// Receive an uploaded chart image, run the fallback analysis, and return
/// the result.
///
/// The upload is written to a named temp file whose guard removes it on
/// every exit path, and copied to an archival `Screenshot <date> <time>.png`
/// in the configured directory. The archival name takes a `.png` suffix
/// regardless of the uploaded format; the bytes are copied verbatim.
pub async fn analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;
            upload = Some((filename, bytes));
            break;
        }
    }
    let (filename, bytes) = upload
        .ok_or_else(|| ApiError::BadRequest("multipart field 'file' is required".to_string()))?;

    // Temp file keeps the upload's extension; dropping the guard deletes it
    // whether analysis succeeds, fails, or errors.
    let suffix = Path::new(&filename)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let temp = tempfile::Builder::new()
        .prefix("chartlens-")
        .suffix(&suffix)
        .tempfile()
        .map_err(|e| ApiError::Internal(format!("Failed to create temp file: {}", e)))?;
    std::fs::write(temp.path(), &bytes)
        .map_err(|e| ApiError::Internal(format!("Failed to store upload: {}", e)))?;

    // Archival copy, named by local timestamp. Never cleaned up here; two
    // requests in the same second may collide on the name, which only
    // affects this auxiliary artifact.
    let screenshot_name = format!(
        "Screenshot {}.png",
        chrono::Local::now().format("%Y-%m-%d %H%M%S")
    );
    let screenshot_path = state.config.screenshot_dir.join(&screenshot_name);
    std::fs::write(&screenshot_path, &bytes)
        .map_err(|e| ApiError::Internal(format!("Failed to save screenshot copy: {}", e)))?;

    if state.config.api_key.is_none() {
        return Err(ApiError::Internal(
            "GOOGLE_API_KEY not set in environment".to_string(),
        ));
    }

    let result = state.analyzer.analyze_path(temp.path()).await;
    info!(upload = %filename, screenshot = %screenshot_name, "analysis request handled");

    Ok(Json(AnalyzeResponse {
        result,
        screenshot: screenshot_name,
    }))
}
