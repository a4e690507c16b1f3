//! End-to-end tests against real model backends.
//!
//! These tests require locally installed CLIs or a running Ollama daemon.
//! They are marked `#[ignore]` to prevent CI failures in environments without
//! them.
//!
//! ## Requirements
//!
//! - Ollama installed and serving: `ollama serve`, with `mistral:latest` pulled
//! - Gemini CLI installed and authenticated: `npm install -g @google/gemini-cli`
//!
//! ## Running E2E Tests
//!
//! ```bash
//! cargo test -p param-extract-adapters -- --ignored
//! ```
//!
//! Model output is non-deterministic, so assertions only check the shape of
//! the exchange, never its content.

use param_extract_adapters::{
    discover_gemini, discover_ollama, GeminiCli, GeminiConfig, OllamaChat, OllamaChatConfig,
    OllamaCli, OllamaRunConfig,
};

const PROMPT: &str = "Reply with the single word: ready";

async fn get_ollama_cli() -> Option<OllamaCli> {
    let path = discover_ollama(None).ok()?;
    let cli = OllamaCli::new(path, OllamaRunConfig::new("mistral:latest"));
    cli.check_health().await.ok().map(|()| cli)
}

#[tokio::test]
#[ignore = "Requires Ollama installed with mistral:latest pulled"]
async fn e2e_ollama_run_returns_text() {
    let Some(cli) = get_ollama_cli().await else {
        eprintln!("Skipping: ollama not available");
        return;
    };

    let reply = cli.generate(PROMPT).await.unwrap();

    assert!(!reply.is_empty());
    assert_eq!(reply, reply.trim(), "stdout should be trimmed");
}

#[tokio::test]
#[ignore = "Requires a running Ollama daemon with mistral:latest pulled"]
async fn e2e_ollama_chat_returns_text() {
    let client = OllamaChat::new(OllamaChatConfig::new("mistral:latest")).unwrap();

    let reply = client.chat(PROMPT).await.unwrap();

    assert!(!reply.trim().is_empty());
}

#[tokio::test]
#[ignore = "Requires a running Ollama daemon"]
async fn e2e_ollama_chat_unknown_model_is_http_error() {
    let client = OllamaChat::new(OllamaChatConfig::new("no-such-model:never")).unwrap();

    let result = client.chat(PROMPT).await;

    assert!(result.is_err());
}

#[tokio::test]
#[ignore = "Requires Gemini CLI installed and authenticated"]
async fn e2e_gemini_returns_response_field() {
    let Ok(path) = discover_gemini(None) else {
        eprintln!("Skipping: gemini not available");
        return;
    };
    let cli = GeminiCli::new(path, GeminiConfig::default());

    let reply = cli.generate(PROMPT).await.unwrap();

    assert!(!reply.trim().is_empty());
}
