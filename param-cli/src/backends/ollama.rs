use async_trait::async_trait;
use param_extract::generate::{GenerationError, TextGenerator};
use param_extract_adapters::{AdapterError, OllamaChat, OllamaCli};

/// Ollama chat API backend. Any failure is logged and becomes `""`.
pub struct OllamaChatGenerator {
    client: OllamaChat,
}

impl OllamaChatGenerator {
    /// Wraps a chat client.
    #[must_use]
    pub const fn new(client: OllamaChat) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TextGenerator for OllamaChatGenerator {
    fn backend_name(&self) -> &str {
        "ollama-chat"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        match self.client.chat(prompt).await {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::warn!(
                    backend = self.backend_name(),
                    model = %self.client.config().model,
                    error = %e,
                    "Ollama chat error, using empty response"
                );
                Ok(String::new())
            }
        }
    }
}

/// `ollama run` backend. A failing run is logged and becomes `""`.
pub struct OllamaRunGenerator {
    cli: OllamaCli,
}

impl OllamaRunGenerator {
    /// Wraps a subprocess client.
    #[must_use]
    pub const fn new(cli: OllamaCli) -> Self {
        Self { cli }
    }
}

#[async_trait]
impl TextGenerator for OllamaRunGenerator {
    fn backend_name(&self) -> &str {
        "ollama-run"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        match self.cli.generate(prompt).await {
            Ok(text) => Ok(text),
            Err(AdapterError::NonZeroExit { exit_code, stderr, .. }) => {
                tracing::warn!(
                    backend = self.backend_name(),
                    model = %self.cli.config.model,
                    exit_code,
                    stderr = %stderr.trim(),
                    "Ollama error, using empty response"
                );
                Ok(String::new())
            }
            Err(e) => Err(GenerationError::new(self.backend_name(), e.to_string())),
        }
    }
}
