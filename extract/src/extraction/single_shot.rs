//! Single-shot extraction: one generation call, normalization, strict validation.

use std::future::Future;

use serde::Deserialize;
use serde_json::Value;

use super::error::ExtractionError;
use super::normalize::{NormalizeError, normalize};
use super::sanitize::sanitize;
use super::validate::SchemaValidator;
use crate::generate::GenerationError;
use crate::prompt::PromptTemplate;
use crate::types::{ParameterSet, RawParameter};

/// Extracts parameters from `input_text` with a single generation call.
///
/// The model is expected to answer with `{"parameters": [{"label", "evidence"}]}`.
/// Empty output, non-JSON output, and a missing or empty parameter list all
/// yield the canonical empty set. Each raw entry is normalized and the
/// assembled set is validated; unlike the retrying strategy, a violation is
/// returned to the caller.
///
/// Uses [`PromptTemplate::default_extraction`] when `template` is `None`.
///
/// # Errors
///
/// Returns `ExtractionError::Backend` if generation fails,
/// `ExtractionError::Normalize` for an entry without a label, and
/// `ExtractionError::SchemaViolation` if the normalized set is rejected.
pub async fn extract<F, Fut>(
    generate: F,
    input_text: &str,
    validator: &SchemaValidator,
    template: Option<&PromptTemplate>,
) -> Result<ParameterSet, ExtractionError>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<String, GenerationError>>,
{
    let default_template;
    let template = match template {
        Some(template) => template,
        None => {
            default_template = PromptTemplate::default_extraction();
            &default_template
        }
    };

    let raw = generate(template.render_input(input_text))
        .await
        .map_err(|source| ExtractionError::Backend { call: 1, source })?;

    if raw.trim().is_empty() {
        tracing::debug!("Empty model output, treating as no parameters");
        return Ok(ParameterSet::empty());
    }

    let parsed = match serde_json::from_str::<Value>(&sanitize(&raw)) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Model output is not JSON, returning empty result");
            return Ok(ParameterSet::empty());
        }
    };

    let Some(entries) = parsed
        .get("parameters")
        .and_then(Value::as_array)
        .filter(|entries| !entries.is_empty())
    else {
        tracing::debug!("Model output has no parameters");
        return Ok(ParameterSet::empty());
    };

    let parameters = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let raw = read_entry(entry, index)?;
            normalize(&raw, index)
        })
        .collect::<Result<Vec<_>, NormalizeError>>()?;

    let result = ParameterSet::from(parameters);
    validator.validate_set(&result)?;

    tracing::debug!(parameters = result.len(), "Single-shot extraction succeeded");
    Ok(result)
}

fn read_entry(entry: &Value, index: usize) -> Result<RawParameter, NormalizeError> {
    RawParameter::deserialize(entry).map_err(|e| NormalizeError::Malformed {
        index,
        message: e.to_string(),
    })
}
