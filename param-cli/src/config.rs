//! Model table and backend selection.

use crate::errors::CliError;
use clap::ValueEnum;
use param_extract::capability::Strategy;

/// Alias used when no model is given.
pub const DEFAULT_MODEL: &str = "gpt-oss";

/// Model aliases and the backend model tags they stand for.
pub const MODEL_MAP: &[(&str, &str)] = &[
    ("gpt-oss", "gpt-oss:20b-cloud"),
    ("gemini-flash", "gemini-3-flash-preview:cloud"),
    ("mistral", "mistral:latest"),
    ("phi3", "phi3:latest"),
];

/// Default extraction prompt file.
pub const EXTRACT_PROMPT_FILE: &str = "extract_parameters.txt";

/// Extraction prompt file for the `mistral` alias.
pub const MISTRAL_PROMPT_FILE: &str = "extract_parameters_mistral.txt";

/// Extraction prompt file for the retrying strategy, which expects full records.
pub const STRUCTURED_PROMPT_FILE: &str = "extract_parameters_structured.txt";

/// Refinement prompt file.
pub const REFINE_PROMPT_FILE: &str = "refine_parameters.txt";

/// Resolves a model alias to its backend model tag.
///
/// # Errors
///
/// Returns `CliError::UnknownModel` listing the valid aliases.
pub fn resolve_model(alias: &str) -> Result<&'static str, CliError> {
    MODEL_MAP
        .iter()
        .find(|(name, _)| *name == alias)
        .map(|(_, model)| *model)
        .ok_or_else(|| CliError::UnknownModel {
            alias: alias.to_string(),
            choices: MODEL_MAP
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Picks the extraction prompt file for a model alias and strategy.
#[must_use]
pub fn extraction_prompt_file(alias: &str, strategy: Strategy) -> &'static str {
    match strategy {
        Strategy::Retry => STRUCTURED_PROMPT_FILE,
        Strategy::SingleShot if alias == "mistral" => MISTRAL_PROMPT_FILE,
        Strategy::SingleShot => EXTRACT_PROMPT_FILE,
    }
}

/// Model backend selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Ollama HTTP chat API (daemon or cloud models).
    #[default]
    OllamaChat,
    /// `ollama run <model>` subprocess.
    OllamaRun,
    /// `gemini -o json` subprocess.
    GeminiCli,
}

impl BackendKind {
    /// Identifier used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OllamaChat => "ollama-chat",
            Self::OllamaRun => "ollama-run",
            Self::GeminiCli => "gemini-cli",
        }
    }
}

/// Extraction strategy selectable on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// One call per snippet with strict validation.
    #[default]
    SingleShot,
    /// Bounded retries with refinement and an empty fallback.
    Retry,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::SingleShot => Self::SingleShot,
            StrategyArg::Retry => Self::Retry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_aliases() {
        assert_eq!(resolve_model("gpt-oss").unwrap(), "gpt-oss:20b-cloud");
        assert_eq!(resolve_model("mistral").unwrap(), "mistral:latest");
        assert_eq!(resolve_model(DEFAULT_MODEL).unwrap(), "gpt-oss:20b-cloud");
    }

    #[test]
    fn unknown_alias_lists_choices() {
        let message = resolve_model("llama").unwrap_err().to_string();
        assert_eq!(
            message,
            "Unknown LLM 'llama'. Choose one of: gpt-oss, gemini-flash, mistral, phi3"
        );
    }

    #[test]
    fn mistral_gets_its_own_prompt() {
        assert_eq!(extraction_prompt_file("mistral", Strategy::SingleShot), MISTRAL_PROMPT_FILE);
        assert_eq!(extraction_prompt_file("phi3", Strategy::SingleShot), EXTRACT_PROMPT_FILE);
        assert_eq!(extraction_prompt_file("mistral", Strategy::Retry), STRUCTURED_PROMPT_FILE);
    }
}
