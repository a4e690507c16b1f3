//! Refinement of names-only responses into full parameter records.

use std::future::Future;

use serde_json::Value;

use super::error::ExtractionError;
use super::sanitize::sanitize;
use super::validate::SchemaValidator;
use crate::generate::GenerationError;
use crate::prompt::PromptTemplate;
use crate::types::ParameterSet;

/// Returns the names when `parsed` is a names-only response.
///
/// A names-only response is an object whose `parameters` array is non-empty
/// and starts with a plain string. Non-string entries after the first are
/// dropped.
#[must_use]
pub fn names_only(parsed: &Value) -> Option<Vec<String>> {
    let entries = parsed.get("parameters")?.as_array()?;
    entries.first()?.as_str()?;
    Some(
        entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}

/// Asks the model to enrich a list of bare parameter names.
///
/// Makes exactly one generation call and does not retry: this is already the
/// fallback path, so any failure is returned to the caller.
///
/// # Errors
///
/// Returns `ExtractionError::Backend` if generation fails,
/// `ExtractionError::Parse` for non-JSON output (an empty response included),
/// `ExtractionError::SchemaViolation` for output the schema rejects, and
/// `ExtractionError::Decode` for schema-valid output that is not a
/// parameter set.
pub async fn refine<F, Fut>(
    generate: &F,
    names: &[String],
    template: &PromptTemplate,
    validator: &SchemaValidator,
) -> Result<ParameterSet, ExtractionError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String, GenerationError>>,
{
    let (_prompt, raw) = request_refinement(generate, names, template, 1).await?;
    parse_validated(&sanitize(&raw), validator)
}

/// Sends the refinement prompt and returns it together with the raw reply.
pub(crate) async fn request_refinement<F, Fut>(
    generate: &F,
    names: &[String],
    template: &PromptTemplate,
    call: usize,
) -> Result<(String, String), ExtractionError>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<String, GenerationError>>,
{
    let prompt = template.render_parameters(names);
    tracing::debug!(names = names.len(), "Requesting refinement of names-only response");

    let raw = generate(prompt.clone())
        .await
        .map_err(|source| ExtractionError::Backend { call, source })?;

    Ok((prompt, raw))
}

/// Parses sanitized text, validates it, and reads it as a parameter set.
pub(crate) fn parse_validated(
    cleaned: &str,
    validator: &SchemaValidator,
) -> Result<ParameterSet, ExtractionError> {
    let parsed: Value = serde_json::from_str(cleaned).map_err(|e| ExtractionError::Parse {
        message: e.to_string(),
        raw_text: cleaned.to_string(),
    })?;

    validator.validate(&parsed)?;

    serde_json::from_value(parsed).map_err(|e| ExtractionError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    #[test]
    fn detects_names_only_lists() {
        let parsed = json!({"parameters": ["width", "depth"]});
        assert_eq!(
            names_only(&parsed),
            Some(vec!["width".to_string(), "depth".to_string()])
        );
    }

    #[test]
    fn structured_and_empty_lists_are_not_names_only() {
        assert_eq!(names_only(&json!({"parameters": []})), None);
        assert_eq!(names_only(&json!({"parameters": [{"label": "x"}]})), None);
        assert_eq!(names_only(&json!({"parameters": "width"})), None);
        assert_eq!(names_only(&json!(["width"])), None);
    }

    #[tokio::test]
    async fn refinement_makes_one_call_with_all_names() {
        let prompts = RefCell::new(Vec::new());
        let generate = |prompt: String| {
            prompts.borrow_mut().push(prompt);
            async {
                Ok::<_, GenerationError>(r#"{"parameters": [{"name": "width", "description": "Width", "type": "integer", "constraints": []}]}"#.to_string())
            }
        };
        let validator = SchemaValidator::for_parameter_set().unwrap();
        let names = vec!["width".to_string(), "depth".to_string()];

        let set = refine(&generate, &names, &PromptTemplate::default_refinement(), &validator)
            .await
            .unwrap();

        assert_eq!(set.len(), 1);
        let prompts = prompts.into_inner();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("\"width\""));
        assert!(prompts[0].contains("\"depth\""));
    }

    #[tokio::test]
    async fn schema_valid_refinement_with_extra_fields_is_accepted() {
        let permissive = SchemaValidator::new(&json!({
            "type": "object",
            "required": ["parameters"],
            "properties": {"parameters": {"type": "array", "items": {
                "type": "object",
                "required": ["name", "description", "type", "constraints"]
            }}}
        }))
        .unwrap();
        let generate = |_prompt: String| async {
            Ok::<_, GenerationError>(r#"{"parameters": [{"name": "width", "description": "Width", "type": "integer", "constraints": [], "evidence": "width is optional"}]}"#.to_string())
        };

        let set = refine(&generate, &["width".to_string()], &PromptTemplate::default_refinement(), &permissive)
            .await
            .unwrap();

        assert_eq!(set.parameters[0].name, "width");
    }

    #[tokio::test]
    async fn refinement_failures_propagate() {
        let validator = SchemaValidator::for_parameter_set().unwrap();
        let names = vec!["width".to_string()];
        let template = PromptTemplate::default_refinement();

        let garbage = |_prompt: String| async { Ok::<_, GenerationError>("definitely not json".to_string()) };
        let result = refine(&garbage, &names, &template, &validator).await;
        assert!(matches!(result, Err(ExtractionError::Parse { .. })));

        let still_names = |_prompt: String| async {
            Ok::<_, GenerationError>(r#"{"parameters": ["width"]}"#.to_string())
        };
        let result = refine(&still_names, &names, &template, &validator).await;
        assert!(matches!(result, Err(ExtractionError::SchemaViolation(_))));

        let empty = |_prompt: String| async { Ok::<_, GenerationError>(String::new()) };
        let result = refine(&empty, &names, &template, &validator).await;
        assert!(matches!(result, Err(ExtractionError::Parse { .. })));
    }
}
