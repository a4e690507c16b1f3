//! Command-line arguments.

use crate::config::{BackendKind, StrategyArg, DEFAULT_MODEL};
use clap::Parser;
use std::path::PathBuf;

/// Extract parameters from specification snippets using LLMs.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Model to use (gpt-oss, gemini-flash, mistral, phi3)
    #[arg(default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Names of snippets to process (default: all in the snippets directory)
    #[arg(long, num_args = 0..)]
    pub snippets: Option<Vec<String>>,

    /// Model backend
    #[arg(long, value_enum, default_value_t = BackendKind::OllamaChat)]
    pub backend: BackendKind,

    /// Extraction strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::SingleShot)]
    pub strategy: StrategyArg,

    /// Maximum attempts per snippet for the retry strategy
    #[arg(long, default_value_t = 3)]
    pub max_retries: usize,

    /// Directory containing `*.txt` snippets
    #[arg(long, default_value = "snippets")]
    pub snippets_dir: PathBuf,

    /// Directory receiving `<model>/<snippet>.yaml` results
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// JSON schema for results (the built-in schema is used if the file is absent)
    #[arg(long, default_value = "schemas/param_schema.json")]
    pub schema: PathBuf,

    /// Directory containing prompt templates
    #[arg(long, default_value = "prompts")]
    pub prompts_dir: PathBuf,
}

impl Cli {
    /// Selected snippet names, or `None` to process every snippet.
    ///
    /// A bare `--snippets` with no names selects everything.
    #[must_use]
    pub fn selected_snippets(&self) -> Option<&[String]> {
        self.snippets.as_deref().filter(|names| !names.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_working_directory_layout() {
        let cli = Cli::parse_from(["param-extract"]);

        assert_eq!(cli.model, "gpt-oss");
        assert_eq!(cli.backend, BackendKind::OllamaChat);
        assert_eq!(cli.strategy, StrategyArg::SingleShot);
        assert_eq!(cli.max_retries, 3);
        assert_eq!(cli.snippets_dir, PathBuf::from("snippets"));
        assert_eq!(cli.output_dir, PathBuf::from("output"));
        assert_eq!(cli.schema, PathBuf::from("schemas/param_schema.json"));
        assert!(cli.selected_snippets().is_none());
    }

    #[test]
    fn parses_snippet_selection_and_backend() {
        let cli = Cli::parse_from([
            "param-extract",
            "mistral",
            "--backend",
            "ollama-run",
            "--strategy",
            "retry",
            "--snippets",
            "vlen",
            "cache",
        ]);

        assert_eq!(cli.model, "mistral");
        assert_eq!(cli.backend, BackendKind::OllamaRun);
        assert_eq!(cli.strategy, StrategyArg::Retry);
        assert_eq!(
            cli.selected_snippets(),
            Some(&["vlen".to_string(), "cache".to_string()][..])
        );
    }

    #[test]
    fn bare_snippets_flag_selects_everything() {
        let cli = Cli::parse_from(["param-extract", "--snippets"]);
        assert!(cli.selected_snippets().is_none());
    }
}
