//! Mock vision backend for deterministic testing.
//!
//! Outcomes are scripted per model name; the ordered call log records which
//! candidates were attempted so tests can assert short-circuit behavior.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chartlens_core::{Error, Result};

use crate::gemini::{EncodedImage, VisionBackend};

#[derive(Clone)]
enum Outcome {
    Success(String),
    Failure(String),
}

/// Scripted vision backend. Models without a scripted outcome fail with a
/// generic error, so a default-constructed mock makes every candidate fail.
#[derive(Clone, Default)]
pub struct MockVisionBackend {
    outcomes: HashMap<String, Outcome>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockVisionBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `model` to return `text`.
    pub fn with_success(mut self, model: impl Into<String>, text: impl Into<String>) -> Self {
        self.outcomes
            .insert(model.into(), Outcome::Success(text.into()));
        self
    }

    /// Script `model` to fail with `message`.
    pub fn with_failure(mut self, model: impl Into<String>, message: impl Into<String>) -> Self {
        self.outcomes
            .insert(model.into(), Outcome::Failure(message.into()));
        self
    }

    /// Models attempted so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log poisoned").clone()
    }
}

#[async_trait]
impl VisionBackend for MockVisionBackend {
    async fn generate(&self, model: &str, _prompt: &str, _image: &EncodedImage) -> Result<String> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(model.to_string());

        match self.outcomes.get(model) {
            Some(Outcome::Success(text)) => Ok(text.clone()),
            Some(Outcome::Failure(message)) => Err(Error::Inference(message.clone())),
            None => Err(Error::Inference(format!("no scripted outcome for {}", model))),
        }
    }
}
