//! Centralized default constants for the chartlens system.
//!
//! **This module is the single source of truth** for all shared default
//! values. Other crates reference these constants instead of defining their
//! own magic strings.

// =============================================================================
// CREDENTIALS
// =============================================================================

/// Environment variable holding the Gemini API key.
pub const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";

// =============================================================================
// MODELS
// =============================================================================

/// Ordered model candidates, tried first to last. The order encodes the
/// capability/version fallback: newest first, older vision models after.
pub const MODEL_CANDIDATES: &[&str] = &[
    "gemini-1.5-flash",
    "gemini-pro-vision",
    "gemini-1.0-pro-vision",
];

/// Base URL of the Gemini generative language API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 8000;

/// Maximum accepted upload size in bytes (chart screenshots are small).
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

// =============================================================================
// FILESYSTEM OUTPUTS
// =============================================================================

/// Analysis log file, appended on every attempt/success/failure.
pub const ANALYSIS_LOG_FILE: &str = "output.txt";

/// Raw model response dump, overwritten on each standalone run.
pub const RAW_RESPONSE_FILE: &str = "ai_response.txt";

/// Image analyzed by the standalone run when no override is given.
pub const STANDALONE_IMAGE_PATH: &str = "Screenshot 2025-06-17 120645.png";

/// Directory where archival screenshot copies accumulate.
pub const SCREENSHOT_DIR: &str = ".";
