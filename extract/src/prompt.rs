//! Prompt templates with literal placeholder substitution.

use std::path::Path;

/// Placeholder replaced by the snippet text in extraction templates.
pub const INPUT_PLACEHOLDER: &str = "{{INPUT}}";

/// Placeholder replaced by the serialized name list in refinement templates.
pub const PARAMETERS_PLACEHOLDER: &str = "{{PARAMETERS}}";

const DEFAULT_EXTRACTION: &str = include_str!("../prompts/extract_parameters.txt");
const MISTRAL_EXTRACTION: &str = include_str!("../prompts/extract_parameters_mistral.txt");
const STRUCTURED_EXTRACTION: &str = include_str!("../prompts/extract_parameters_structured.txt");
const DEFAULT_REFINEMENT: &str = include_str!("../prompts/refine_parameters.txt");

/// A prompt template.
///
/// Substitution is plain substring replacement, there is no expression
/// language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    /// Wraps template text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Reads a template from disk.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        std::fs::read_to_string(path).map(Self::new)
    }

    /// Built-in extraction template.
    #[must_use]
    pub fn default_extraction() -> Self {
        Self::new(DEFAULT_EXTRACTION)
    }

    /// Built-in extraction template tuned for smaller local models.
    #[must_use]
    pub fn mistral_extraction() -> Self {
        Self::new(MISTRAL_EXTRACTION)
    }

    /// Built-in extraction template asking for fully normalized records.
    ///
    /// Used with the retrying strategy, which validates model output against
    /// the schema as-is.
    #[must_use]
    pub fn structured_extraction() -> Self {
        Self::new(STRUCTURED_EXTRACTION)
    }

    /// Built-in refinement template.
    #[must_use]
    pub fn default_refinement() -> Self {
        Self::new(DEFAULT_REFINEMENT)
    }

    /// Raw template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Substitutes the snippet text for [`INPUT_PLACEHOLDER`].
    #[must_use]
    pub fn render_input(&self, input: &str) -> String {
        self.text.replace(INPUT_PLACEHOLDER, input)
    }

    /// Substitutes the pretty-printed name list for [`PARAMETERS_PLACEHOLDER`].
    #[must_use]
    pub fn render_parameters(&self, names: &[String]) -> String {
        let serialized =
            serde_json::to_string_pretty(names).unwrap_or_else(|_| names.join("\n"));
        self.text.replace(PARAMETERS_PLACEHOLDER, &serialized)
    }
}
