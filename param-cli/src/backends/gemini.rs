use async_trait::async_trait;
use param_extract::generate::{GenerationError, TextGenerator};
use param_extract_adapters::GeminiCli;

/// Gemini CLI backend. Failures are raised to the caller.
pub struct GeminiGenerator {
    cli: GeminiCli,
}

impl GeminiGenerator {
    /// Wraps a Gemini CLI client.
    #[must_use]
    pub const fn new(cli: GeminiCli) -> Self {
        Self { cli }
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    fn backend_name(&self) -> &str {
        "gemini-cli"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.cli
            .generate(prompt)
            .await
            .map_err(|e| GenerationError::new(self.backend_name(), e.to_string()))
    }
}
