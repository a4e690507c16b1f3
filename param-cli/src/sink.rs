//! YAML result files.

use crate::errors::CliError;
use param_extract::types::ParameterSet;
use std::path::{Path, PathBuf};

/// Writes one YAML document per snippet under `<output_dir>/<model_alias>/`.
#[derive(Debug, Clone)]
pub struct YamlSink {
    dir: PathBuf,
}

impl YamlSink {
    /// Creates the per-model output directory.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Write` if the directory cannot be created.
    pub fn new(output_dir: &Path, model_alias: &str) -> Result<Self, CliError> {
        let dir = output_dir.join(model_alias);
        std::fs::create_dir_all(&dir).map_err(|source| CliError::Write {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Directory results are written to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `result` to `<name>.yaml`, returning the file path.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Serialize` or `CliError::Write`.
    pub fn write(&self, name: &str, result: &ParameterSet) -> Result<PathBuf, CliError> {
        let path = self.dir.join(format!("{name}.yaml"));
        let yaml = serde_yaml::to_string(result)?;
        std::fs::write(&path, yaml).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
