//! # chartlens-inference
//!
//! Gemini vision backend and model fallback client for chartlens.
//!
//! This crate provides:
//! - The `VisionBackend` trait and its Gemini REST implementation
//! - The fixed chart-analysis prompt
//! - The ordered model fallback client (`ModelFallbackClient`)
//! - The `ChartAnalyzer` seam the HTTP layer consumes
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chartlens_core::{defaults, MemoryAnalysisLog};
//! use chartlens_inference::{ChartAnalyzer, GeminiBackend, ModelFallbackClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = Arc::new(GeminiBackend::new(
//!         "api-key".to_string(),
//!         defaults::GEMINI_BASE_URL.to_string(),
//!     ));
//!     let client = ModelFallbackClient::new(
//!         backend,
//!         vec!["gemini-1.5-flash".to_string()],
//!         Arc::new(MemoryAnalysisLog::new()),
//!     );
//!     let text = client.analyze_path(std::path::Path::new("chart.png")).await;
//!     println!("{}", text);
//! }
//! ```

pub mod fallback;
pub mod gemini;
pub mod prompt;

// Mock vision backend for testing (feature `mock`)
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use fallback::{ChartAnalyzer, ModelFallbackClient, ALL_MODELS_FAILED};
pub use gemini::{EncodedImage, GeminiBackend, VisionBackend};
pub use prompt::CHART_ANALYSIS_PROMPT;
