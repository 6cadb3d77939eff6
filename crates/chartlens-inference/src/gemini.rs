//! Vision backend trait and Gemini REST implementation.

use async_trait::async_trait;
use base64::Engine;
use chartlens_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An image prepared once for upload: validated, MIME-typed, base64-encoded.
///
/// Preparing the image before the fallback loop means a corrupt upload
/// aborts the whole call instead of failing once per candidate model.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    /// Base64-encoded image bytes.
    pub data: String,
    /// Detected MIME type (e.g. "image/png", "image/jpeg").
    pub mime_type: String,
}

impl EncodedImage {
    /// Validate that `bytes` decode as an image and encode them for upload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let format = image::guess_format(bytes).map_err(|e| Error::Decode(e.to_string()))?;
        // Full decode catches truncated files that pass the magic-byte check.
        image::load_from_memory(bytes).map_err(|e| Error::Decode(e.to_string()))?;

        Ok(Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type: format.to_mime_type().to_string(),
        })
    }
}

/// Backend capable of describing an image with a named vision model.
#[async_trait]
pub trait VisionBackend: Send + Sync {
    /// Run one generate-content call against `model`.
    async fn generate(&self, model: &str, prompt: &str, image: &EncodedImage) -> Result<String>;
}

/// Gemini REST backend (generativelanguage.googleapis.com).
pub struct GeminiBackend {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiBackend {
    /// Create a backend for the given key and API base URL.
    ///
    /// The client carries no request timeout: an upstream call may block for
    /// its full duration, and callers needing bounded latency impose their
    /// own bound at the boundary.
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl VisionBackend for GeminiBackend {
    async fn generate(&self, model: &str, prompt: &str, image: &EncodedImage) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        text: Some(prompt.to_string()),
                        inline_data: None,
                    },
                    Part {
                        text: None,
                        inline_data: Some(InlineData {
                            mime_type: image.mime_type.clone(),
                            data: image.data.clone(),
                        }),
                    },
                ],
            }],
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );
        debug!(model = %model, mime = %image.mime_type, "sending generateContent request");

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!(
                "Gemini API returned {}: {}",
                status, body
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse Gemini response: {}", e)))?;

        let text = result
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| Error::Inference("Gemini response contained no candidates".into()))?;

        debug!(model = %model, response_len = text.len(), "generateContent succeeded");
        Ok(text)
    }
}
