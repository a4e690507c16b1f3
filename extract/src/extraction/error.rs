//! Error types for extraction operations.

use thiserror::Error;

use super::normalize::NormalizeError;
use super::validate::SchemaViolation;
use crate::generate::GenerationError;

/// Errors that escape an extraction call.
///
/// The retrying strategy absorbs parse failures and schema violations itself;
/// what reaches the caller is either a backend failure, a refinement failure,
/// or a failure of the strict single-shot path.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The generation backend raised instead of returning text.
    #[error("Generation failed at call {call}: {source}")]
    Backend {
        /// Generation call number (1-indexed).
        call: usize,
        /// Backend failure.
        #[source]
        source: GenerationError,
    },

    /// Model output was not valid JSON.
    #[error("JSON parsing failed: {message}")]
    Parse {
        /// Parse error message.
        message: String,
        /// Sanitized text that failed to parse.
        raw_text: String,
    },

    /// A result did not conform to the schema.
    #[error(transparent)]
    SchemaViolation(#[from] SchemaViolation),

    /// Schema-valid JSON could not be read as a parameter set.
    #[error("Result does not match the parameter set shape: {0}")]
    Decode(String),

    /// Schema compilation failed.
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// A raw parameter could not be normalized.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}
