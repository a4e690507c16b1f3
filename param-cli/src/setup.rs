//! Loading of the schema and prompt templates.

use anyhow::Context;
use param_extract::prompt::PromptTemplate;
use param_extract::types::ParameterSet;
use serde_json::Value;
use std::path::Path;

/// Reads the result schema, or derives the built-in one if `path` does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is not JSON.
pub fn load_schema(path: &Path) -> anyhow::Result<Value> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "Schema file not found, using built-in schema");
        return Ok(ParameterSet::json_schema());
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Schema {} is not valid JSON", path.display()))
}

/// Reads `dir/file_name`, or returns `fallback()` if the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn load_template(
    dir: &Path,
    file_name: &str,
    fallback: fn() -> PromptTemplate,
) -> anyhow::Result<PromptTemplate> {
    let path = dir.join(file_name);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Prompt file not found, using built-in template");
        return Ok(fallback());
    }

    PromptTemplate::from_file(&path)
        .with_context(|| format!("Failed to read prompt {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_schema_falls_back_to_derived() {
        let dir = tempfile::tempdir().unwrap();
        let schema = load_schema(&dir.path().join("absent.json")).unwrap();
        assert_eq!(schema, ParameterSet::json_schema());
    }

    #[test]
    fn reads_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, r#"{"type": "object"}"#).unwrap();

        assert_eq!(load_schema(&path).unwrap(), json!({"type": "object"}));
    }

    #[test]
    fn malformed_schema_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(&path, "{").unwrap();

        let message = format!("{:#}", load_schema(&path).unwrap_err());
        assert!(message.contains("is not valid JSON"));
    }

    #[test]
    fn prompt_file_overrides_built_in() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("custom.txt"), "Find parameters in {{INPUT}}").unwrap();

        let template = load_template(dir.path(), "custom.txt", PromptTemplate::default_extraction).unwrap();
        assert_eq!(template.render_input("VLEN"), "Find parameters in VLEN");

        let fallback = load_template(dir.path(), "absent.txt", PromptTemplate::default_extraction).unwrap();
        assert_eq!(fallback.as_str(), PromptTemplate::default_extraction().as_str());
    }
}
