//! Backend configuration and run results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default timeout for one generation call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Default Ollama server address.
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// Environment variable holding the Ollama server address.
pub const OLLAMA_HOST_ENV_VAR: &str = "OLLAMA_HOST";

/// Configuration for `ollama run <model>` subprocess calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaRunConfig {
    /// Model tag, e.g. `mistral:latest`.
    pub model: String,
    /// Maximum wall time per call.
    pub timeout: Duration,
    /// Working directory of the subprocess.
    pub cwd: Option<PathBuf>,
}

impl OllamaRunConfig {
    /// Configuration for `model` with default settings.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
            cwd: None,
        }
    }
}

/// Configuration for the Ollama HTTP chat API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaChatConfig {
    /// Model tag, e.g. `gpt-oss:20b-cloud`.
    pub model: String,
    /// Server address without trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OllamaChatConfig {
    /// Configuration for `model`, reading the address from `OLLAMA_HOST`.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        let base_url = std::env::var(OLLAMA_HOST_ENV_VAR)
            .map_or_else(|_| DEFAULT_OLLAMA_HOST.to_string(), |host| normalize_host(&host));
        Self {
            model: model.into(),
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the server address.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_host(base_url);
        self
    }
}

/// Configuration for `gemini -o json` subprocess calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Model override passed with `-m`.
    pub model: Option<String>,
    /// Maximum wall time per call.
    pub timeout: Duration,
    /// Working directory of the subprocess.
    pub cwd: Option<PathBuf>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: None,
            timeout: DEFAULT_TIMEOUT,
            cwd: None,
        }
    }
}

/// Captured output of a finished subprocess.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
    /// Exit code.
    pub exit_code: i32,
    /// Wall time in milliseconds.
    pub duration_ms: u64,
}

/// Adds a scheme when missing and strips trailing slashes.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{host}")
    }
}
