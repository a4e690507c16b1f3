//! `TextGenerator` implementations over the adapter clients.
//!
//! Each backend owns its failure policy: the Ollama backends log and degrade
//! to an empty response, the Gemini backend raises.

pub mod gemini;
pub mod ollama;

use crate::config::BackendKind;
use crate::errors::CliError;
use param_extract::generate::TextGenerator;
use param_extract_adapters::{
    discover_gemini, discover_ollama, GeminiCli, GeminiConfig, OllamaChat, OllamaChatConfig,
    OllamaCli, OllamaRunConfig,
};
use std::sync::Arc;

pub use gemini::GeminiGenerator;
pub use ollama::{OllamaChatGenerator, OllamaRunGenerator};

/// Builds the generator for `kind`, serving `model`.
///
/// The Gemini CLI picks its own model, so `model` is not passed to it.
///
/// # Errors
///
/// Returns `CliError::Backend` if the backend executable cannot be found or
/// the HTTP client cannot be built.
pub fn build_generator(kind: BackendKind, model: &str) -> Result<Arc<dyn TextGenerator>, CliError> {
    let generator: Arc<dyn TextGenerator> = match kind {
        BackendKind::OllamaChat => {
            let client = OllamaChat::new(OllamaChatConfig::new(model))?;
            tracing::debug!(base_url = %client.config().base_url, "Using Ollama chat API");
            Arc::new(OllamaChatGenerator::new(client))
        }
        BackendKind::OllamaRun => {
            let path = discover_ollama(None)?;
            tracing::debug!(path = %path.display(), "Using ollama executable");
            Arc::new(OllamaRunGenerator::new(OllamaCli::new(path, OllamaRunConfig::new(model))))
        }
        BackendKind::GeminiCli => {
            let path = discover_gemini(None)?;
            tracing::debug!(path = %path.display(), "Using gemini executable");
            Arc::new(GeminiGenerator::new(GeminiCli::new(path, GeminiConfig::default())))
        }
    };
    Ok(generator)
}
