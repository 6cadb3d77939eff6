//! Standalone run: analyze a single on-disk chart image.
//!
//! Truncates the analysis log, runs one fallback analysis against the image
//! at `ANALYZE_IMAGE` (or the built-in default path), prints the result, and
//! overwrites `ai_response.txt` with the raw model text. Handled preflight
//! failures (missing key, missing image) are logged and end the run; only an
//! unhandled error exits with status 1.

use std::path::Path;
use std::sync::Arc;

use chartlens_core::{defaults, AnalysisLog, AppConfig, FileAnalysisLog};
use chartlens_inference::{ChartAnalyzer, GeminiBackend, ModelFallbackClient};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("An unexpected error occurred: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env();

    let file_log = FileAnalysisLog::new(&config.analysis_log_path);
    file_log.truncate()?;
    let log: Arc<dyn AnalysisLog> = Arc::new(file_log);

    log.append("=== Image Analysis with Google Gemini ===\n");
    log.append("Loading environment variables...");

    let Some(api_key) = config.api_key.clone() else {
        log.append("Error: Google API key not found.");
        log.append("Please set GOOGLE_API_KEY in your .env file.");
        return Ok(());
    };
    log.append("API key loaded successfully.");

    let image_path = std::env::var("ANALYZE_IMAGE")
        .unwrap_or_else(|_| defaults::STANDALONE_IMAGE_PATH.to_string());
    if !Path::new(&image_path).exists() {
        log.append(&format!("Error: Image not found at path: {}", image_path));
        return Ok(());
    }
    log.append(&format!("Image found: {}", image_path));

    log.append("\nAnalyzing image...");
    let backend = Arc::new(GeminiBackend::new(api_key, config.gemini_base_url.clone()));
    let client = ModelFallbackClient::new(backend, config.models.clone(), log.clone());
    let description = client.analyze_path(Path::new(&image_path)).await;

    let separator = "=".repeat(50);
    log.append(&format!("\n{}", separator));
    log.append("GEMINI AI RESPONSE - DIRECT OUTPUT:");
    log.append(&separator);
    log.append(&description);
    log.append(&separator);

    std::fs::write(defaults::RAW_RESPONSE_FILE, &description)?;

    log.append(&format!(
        "\nComplete logs have been saved to: {}",
        config.analysis_log_path.display()
    ));
    log.append(&format!(
        "Raw AI response has been saved to: {}",
        defaults::RAW_RESPONSE_FILE
    ));

    Ok(())
}
