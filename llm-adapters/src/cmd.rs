//! Command-line argument construction for backend binaries.
//!
//! Prompts go through stdin, never argv, so their length is unbounded.

use crate::types::{GeminiConfig, OllamaRunConfig};
use std::ffi::OsString;

/// Builds the argument list for `ollama run`.
#[must_use]
pub fn build_ollama_args(config: &OllamaRunConfig) -> Vec<OsString> {
    vec![OsString::from("run"), OsString::from(&config.model)]
}

/// Builds the argument list for a Gemini CLI invocation with JSON output.
#[must_use]
pub fn build_gemini_args(config: &GeminiConfig) -> Vec<OsString> {
    let mut args = vec![OsString::from("-o"), OsString::from("json")];

    if let Some(ref model) = config.model {
        args.push(OsString::from("-m"));
        args.push(OsString::from(model));
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ollama_args() {
        let args = build_ollama_args(&OllamaRunConfig::new("mistral:latest"));
        assert_eq!(args, vec![OsString::from("run"), OsString::from("mistral:latest")]);
    }

    #[test]
    fn gemini_args_with_and_without_model() {
        assert_eq!(build_gemini_args(&GeminiConfig::default()), vec!["-o", "json"]);

        let config = GeminiConfig {
            model: Some("gemini-2.5-flash".to_string()),
            ..GeminiConfig::default()
        };
        assert_eq!(build_gemini_args(&config), vec!["-o", "json", "-m", "gemini-2.5-flash"]);
    }
}
