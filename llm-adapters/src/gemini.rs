//! Gemini CLI backend.

use crate::cmd::build_gemini_args;
use crate::error::AdapterError;
use crate::process::run_with_input;
use crate::types::GeminiConfig;
use serde::Deserialize;
use std::path::PathBuf;

/// Outer JSON document printed by `gemini -o json`.
#[derive(Debug, Deserialize)]
struct GeminiOutput {
    response: String,
}

/// Client for the Gemini CLI, prompt on stdin.
#[derive(Debug, Clone)]
pub struct GeminiCli {
    /// Filesystem path to the `gemini` executable.
    pub path: PathBuf,
    /// Run configuration.
    pub config: GeminiConfig,
}

impl GeminiCli {
    /// Creates a client from a resolved executable path.
    #[must_use]
    pub const fn new(path: PathBuf, config: GeminiConfig) -> Self {
        Self { path, config }
    }

    /// Runs `prompt` and returns the `response` field of the CLI's JSON output.
    ///
    /// # Errors
    /// Returns `AdapterError::NonZeroExit` on failure exit, and
    /// `AdapterError::ResponseParsing` when stdout is not the expected JSON.
    pub async fn generate(&self, prompt: &str) -> Result<String, AdapterError> {
        let args = build_gemini_args(&self.config);
        let result = run_with_input(
            &self.path,
            &args,
            prompt,
            self.config.timeout,
            self.config.cwd.as_deref(),
        )
        .await?;
        tracing::debug!(duration_ms = result.duration_ms, "gemini run finished");
        parse_gemini_output(&result.stdout)
    }
}

fn parse_gemini_output(stdout: &str) -> Result<String, AdapterError> {
    serde_json::from_str::<GeminiOutput>(stdout)
        .map(|outer| outer.response)
        .map_err(|e| AdapterError::ResponseParsing(format!("gemini output: {e}")))
}
