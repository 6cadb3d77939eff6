//! Ordered model fallback client.
//!
//! Candidates are tried once each, in order. The first success wins; a
//! failed candidate is logged and the next one is tried. This is a
//! substitution strategy, not a retry: no candidate is called twice and
//! there is no backoff.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chartlens_core::AnalysisLog;
use tracing::{info, warn};

use crate::gemini::{EncodedImage, VisionBackend};
use crate::prompt::CHART_ANALYSIS_PROMPT;

/// Terminal failure text returned when every candidate has failed.
pub const ALL_MODELS_FAILED: &str = "Error: All models failed to analyze the image.";

/// Seam consumed by the HTTP layer and the standalone binary.
///
/// The contract is text-in-all-cases: handled failures come back as
/// `"Error: ..."` strings, never as an `Err`.
#[async_trait]
pub trait ChartAnalyzer: Send + Sync {
    /// Analyze the image at `path`, returning the model's text or a
    /// failure-describing string.
    async fn analyze_path(&self, path: &Path) -> String;
}

/// Tries an ordered list of model identifiers until one succeeds.
pub struct ModelFallbackClient {
    backend: Arc<dyn VisionBackend>,
    models: Vec<String>,
    log: Arc<dyn AnalysisLog>,
}

impl ModelFallbackClient {
    pub fn new(
        backend: Arc<dyn VisionBackend>,
        models: Vec<String>,
        log: Arc<dyn AnalysisLog>,
    ) -> Self {
        Self {
            backend,
            models,
            log,
        }
    }

    /// Analyze in-memory image bytes.
    ///
    /// The image is validated and encoded once, before the loop: a corrupt
    /// upload aborts the whole call rather than failing per candidate.
    pub async fn analyze_bytes(&self, bytes: &[u8]) -> String {
        let image = match EncodedImage::from_bytes(bytes) {
            Ok(image) => image,
            Err(e) => {
                self.log
                    .append(&format!("Unexpected error in analyze_image: {}", e));
                return format!("Error: {}", e);
            }
        };

        for model in &self.models {
            self.log.append(&format!("Trying model: {}", model));
            match self
                .backend
                .generate(model, CHART_ANALYSIS_PROMPT, &image)
                .await
            {
                Ok(text) => {
                    info!(model = %model, response_len = text.len(), "analysis succeeded");
                    self.log.append(&format!("Success with model: {}", model));
                    return text;
                }
                Err(e) => {
                    warn!(model = %model, error = %e, "candidate failed, trying next");
                    self.log.append(&format!("Error with model {}: {}", model, e));
                }
            }
        }

        ALL_MODELS_FAILED.to_string()
    }
}

#[async_trait]
impl ChartAnalyzer for ModelFallbackClient {
    async fn analyze_path(&self, path: &Path) -> String {
        match std::fs::read(path) {
            Ok(bytes) => self.analyze_bytes(&bytes).await,
            Err(e) => {
                self.log
                    .append(&format!("Unexpected error in analyze_image: {}", e));
                format!("Error: {}", e)
            }
        }
    }
}
