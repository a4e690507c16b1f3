//! Error types for the batch driver.

use param_extract::server::ServerError;
use param_extract_adapters::AdapterError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up or running a batch.
#[derive(Debug, Error)]
pub enum CliError {
    /// The model alias is not in the model table.
    #[error("Unknown LLM '{alias}'. Choose one of: {choices}")]
    UnknownModel {
        /// Alias given on the command line.
        alias: String,
        /// Comma-separated valid aliases.
        choices: String,
    },

    /// A backend could not be located or initialized.
    #[error("Backend setup failed: {0}")]
    Backend(#[from] AdapterError),

    /// Extraction of one snippet failed.
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ServerError),

    /// A result could not be serialized.
    #[error("Failed to serialize result: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// A result file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
