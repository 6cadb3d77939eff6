//! Startup configuration.
//!
//! All environment access happens once here; handlers receive an explicit
//! config struct instead of reading the environment per request. Call
//! `dotenvy::dotenv().ok()` in the binary before `AppConfig::from_env()`.

use std::path::PathBuf;

use crate::defaults;

/// Process-wide configuration, populated at startup and read-only after.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gemini API key. `None` is not a startup error: the HTTP handler
    /// reports it per request, and the analyzer is never invoked.
    pub api_key: Option<String>,
    /// HTTP bind host.
    pub host: String,
    /// HTTP bind port.
    pub port: u16,
    /// Base URL of the Gemini API (overridable for tests).
    pub gemini_base_url: String,
    /// Ordered model candidates for the fallback loop.
    pub models: Vec<String>,
    /// Path of the flat analysis log.
    pub analysis_log_path: PathBuf,
    /// Directory receiving archival screenshot copies.
    pub screenshot_dir: PathBuf,
}

impl AppConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Self {
        let api_key = std::env::var(defaults::ENV_GOOGLE_API_KEY)
            .ok()
            .filter(|k| !k.is_empty());
        let host = std::env::var("HOST").unwrap_or_else(|_| defaults::SERVER_HOST.to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(defaults::SERVER_PORT);
        let gemini_base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| defaults::GEMINI_BASE_URL.to_string());

        Self {
            api_key,
            host,
            port,
            gemini_base_url,
            models: defaults::MODEL_CANDIDATES
                .iter()
                .map(|m| m.to_string())
                .collect(),
            analysis_log_path: PathBuf::from(defaults::ANALYSIS_LOG_FILE),
            screenshot_dir: PathBuf::from(defaults::SCREENSHOT_DIR),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
            gemini_base_url: defaults::GEMINI_BASE_URL.to_string(),
            models: defaults::MODEL_CANDIDATES
                .iter()
                .map(|m| m.to_string())
                .collect(),
            analysis_log_path: PathBuf::from(defaults::ANALYSIS_LOG_FILE),
            screenshot_dir: PathBuf::from(defaults::SCREENSHOT_DIR),
        }
    }
}
