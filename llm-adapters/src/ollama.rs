//! Ollama backends: the `ollama run` subprocess and the HTTP chat API.

use crate::cmd::build_ollama_args;
use crate::error::AdapterError;
use crate::process::run_with_input;
use crate::types::{OllamaChatConfig, OllamaRunConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::process::Command;

/// Client for `ollama run <model>`, prompt on stdin.
#[derive(Debug, Clone)]
pub struct OllamaCli {
    /// Filesystem path to the `ollama` executable.
    pub path: PathBuf,
    /// Run configuration.
    pub config: OllamaRunConfig,
}

impl OllamaCli {
    /// Creates a client from a resolved executable path.
    #[must_use]
    pub const fn new(path: PathBuf, config: OllamaRunConfig) -> Self {
        Self { path, config }
    }

    /// Checks that the binary runs.
    ///
    /// # Errors
    /// Returns an error if the binary cannot be executed or reports failure.
    pub async fn check_health(&self) -> Result<(), AdapterError> {
        let output = Command::new(&self.path)
            .arg("--version")
            .output()
            .await
            .map_err(|e| AdapterError::SpawnFailed {
                stage: "health check".to_string(),
                source: e,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(AdapterError::ExecutableNotFound(format!(
                "{} --version failed",
                self.path.display()
            )))
        }
    }

    /// Runs `prompt` through the model and returns trimmed stdout.
    ///
    /// # Errors
    /// Returns `AdapterError::NonZeroExit` if the model run fails, and any
    /// subprocess error from [`run_with_input`].
    pub async fn generate(&self, prompt: &str) -> Result<String, AdapterError> {
        let args = build_ollama_args(&self.config);
        let result = run_with_input(
            &self.path,
            &args,
            prompt,
            self.config.timeout,
            self.config.cwd.as_deref(),
        )
        .await?;
        tracing::debug!(model = %self.config.model, duration_ms = result.duration_ms, "ollama run finished");
        Ok(result.stdout.trim().to_string())
    }
}

/// A chat message in the Ollama API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `user`, `assistant`, or `system`.
    pub role: String,
    /// Message text.
    pub content: String,
}

/// Request body for `/api/chat`.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

/// Response body from `/api/chat` with streaming disabled.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

/// Client for the Ollama HTTP chat API, local or cloud-proxied models alike.
#[derive(Debug, Clone)]
pub struct OllamaChat {
    client: reqwest::Client,
    config: OllamaChatConfig,
}

impl OllamaChat {
    /// Creates a client.
    ///
    /// # Errors
    /// Returns `AdapterError::Http` if the HTTP client cannot be built.
    pub fn new(config: OllamaChatConfig) -> Result<Self, AdapterError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// The client configuration.
    #[must_use]
    pub const fn config(&self) -> &OllamaChatConfig {
        &self.config
    }

    /// Sends `prompt` as a single user message and returns the reply text.
    ///
    /// # Errors
    /// Returns `AdapterError::Http` for transport failures,
    /// `AdapterError::HttpStatus` for non-success statuses, and
    /// `AdapterError::ResponseParsing` for unexpected bodies.
    pub async fn chat(&self, prompt: &str) -> Result<String, AdapterError> {
        let url = format!("{}/api/chat", self.config.base_url);
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            stream: false,
        };

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AdapterError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        parse_chat_response(&text)
    }
}

fn parse_chat_response(body: &str) -> Result<String, AdapterError> {
    serde_json::from_str::<ChatResponse>(body)
        .map(|parsed| parsed.message.content)
        .map_err(|e| AdapterError::ResponseParsing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_request_shape() {
        let request = ChatRequest {
            model: "gpt-oss:20b-cloud",
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "hi".to_string(),
            }],
            stream: false,
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-oss:20b-cloud",
                "messages": [{"role": "user", "content": "hi"}],
                "stream": false
            })
        );
    }

    #[test]
    fn parses_chat_reply() {
        let body = r#"{"model": "m", "message": {"role": "assistant", "content": "{\"parameters\": []}"}, "done": true}"#;
        assert_eq!(parse_chat_response(body).unwrap(), r#"{"parameters": []}"#);
    }

    #[test]
    fn rejects_unexpected_body() {
        assert!(matches!(
            parse_chat_response(r#"{"error": "model not found"}"#),
            Err(AdapterError::ResponseParsing(_))
        ));
    }
}
