//! Model backends for the parameter extraction pipeline.
//!
//! This crate provides discovery and execution of the `ollama` and `gemini`
//! command-line tools, and a client for the Ollama HTTP chat API. It knows
//! nothing about extraction; callers wrap these clients in their own
//! generation interface.

/// Command-line argument construction for backend binaries.
pub mod cmd;
/// Discovery and resolution of backend executables.
pub mod discovery;
/// Error types returned by adapter operations.
pub mod error;
/// Gemini CLI client.
pub mod gemini;
/// Ollama subprocess and HTTP clients.
pub mod ollama;
/// Subprocess execution with timeouts and signal handling.
pub mod process;
/// Configuration and result types.
pub mod types;

pub use discovery::{discover_gemini, discover_ollama, GEMINI_BIN_ENV_VAR, OLLAMA_BIN_ENV_VAR};
pub use error::AdapterError;
pub use gemini::GeminiCli;
pub use ollama::{OllamaChat, OllamaCli};
pub use process::run_with_input;
pub use types::*;
