//! The text-generation capability consumed by the pipeline.

use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a generation backend.
///
/// Backends decide whether a failure surfaces here or is translated into an
/// empty response; the pipeline never inspects the cause.
#[derive(Debug, Error)]
#[error("{backend} generation failed: {message}")]
pub struct GenerationError {
    /// Backend identifier, e.g. `"gemini-cli"`.
    pub backend: String,
    /// Human-readable cause.
    pub message: String,
}

impl GenerationError {
    /// Creates an error attributed to `backend`.
    #[must_use]
    pub fn new(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            message: message.into(),
        }
    }
}

/// A model backend that turns a prompt into raw text.
///
/// One implementation exists per backend; the surrounding system picks one at
/// startup and hands it to the pipeline.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short backend identifier used in logs.
    fn backend_name(&self) -> &str;

    /// Generates raw text for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
