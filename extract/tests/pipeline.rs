use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use param_extract::extraction::{Outcome, single_shot};
use param_extract::prelude::*;
use serde_json::json;

/// Generator that replays canned responses and records every prompt.
struct ScriptedGenerator {
    responses: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    fn new(responses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.iter().rev().map(|r| (*r).to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn backend_name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.responses.lock().unwrap().pop().unwrap_or_default())
    }
}

fn param_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "required": ["parameters"],
        "additionalProperties": false,
        "properties": {
            "parameters": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name", "description", "type", "constraints"],
                    "additionalProperties": false,
                    "properties": {
                        "name": {"type": "string", "pattern": "^[a-z0-9_]+$"},
                        "description": {"type": "string"},
                        "type": {"enum": ["integer", "boolean", "enum", "structure"]},
                        "constraints": {"type": "array", "items": {"type": "string"}}
                    }
                }
            }
        }
    })
}

#[tokio::test]
async fn end_to_end_cache_size_example() {
    let generator = ScriptedGenerator::new(&[
        r#"{"parameters":[{"label":"cache size","evidence":"uniform across cores"}]}"#,
    ]);
    let capability = ExtractParameters::new(generator.clone(), &param_schema()).unwrap();
    let server = CapabilityServer::new().with_capability(capability);

    let result = server
        .handle(&Request::new(
            ExtractParameters::NAME,
            "The implementation-defined cache size must be uniform across cores.",
        ))
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"parameters": [{
            "name": "cache_size",
            "description": "Cache size",
            "type": "integer",
            "constraints": ["must be uniform across the system"]
        }]})
    );
    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("implementation-defined cache size"));
}

#[tokio::test]
async fn refinement_trigger_returns_refined_result_unchanged() {
    let refined = json!({"parameters": [
        {"name": "width", "description": "Width", "type": "integer", "constraints": []},
        {"name": "depth", "description": "Depth", "type": "integer", "constraints": []}
    ]});
    let refined_text = refined.to_string();
    let generator = ScriptedGenerator::new(&[r#"{"parameters": ["width", "depth"]}"#, refined_text.as_str()]);
    let backend = generator.clone();

    let report = ExtractionOrchestrator::new(&param_schema())
        .unwrap()
        .run_detailed(
            |prompt: String| {
                let backend = backend.clone();
                async move { backend.generate(&prompt).await }
            },
            || "extract please".to_string(),
        )
        .await
        .unwrap();

    assert_eq!(report.outcome, Outcome::Refined);
    assert_eq!(serde_json::to_value(&report.parameters).unwrap(), refined);

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[1].contains("\"width\"") && prompts[1].contains("\"depth\""));
}

#[tokio::test]
async fn orchestrator_never_fails_on_bad_output() {
    let generator = ScriptedGenerator::new(&["{not json", r#"{"parameters": [{"label": "x"}]}"#, "```\n```"]);
    let backend = generator.clone();

    let set = ExtractionOrchestrator::new(&param_schema())
        .unwrap()
        .run(
            |prompt: String| {
                let backend = backend.clone();
                async move { backend.generate(&prompt).await }
            },
            || "extract".to_string(),
        )
        .await
        .unwrap();

    assert_eq!(set, ParameterSet::empty());
    assert_eq!(generator.prompts().len(), 3);
}

#[tokio::test]
async fn single_shot_rejects_names_that_break_the_schema() {
    let validator = SchemaValidator::new(&param_schema()).unwrap();
    let generate = |_prompt: String| async {
        Ok::<_, GenerationError>(r#"{"parameters": [{"label": "L1-cache size"}]}"#.to_string())
    };

    let result = single_shot::extract(generate, "snippet", &validator, None).await;

    assert!(matches!(result, Err(ExtractionError::SchemaViolation(_))));
}

#[tokio::test]
async fn server_surfaces_capability_errors() {
    let generator = ScriptedGenerator::new(&[r#"{"parameters": [{"evidence": "no label"}]}"#]);
    let server = CapabilityServer::new()
        .with_capability(ExtractParameters::new(generator, &param_schema()).unwrap());

    let error = server
        .handle(&Request::new(ExtractParameters::NAME, "text"))
        .await
        .unwrap_err();

    assert!(matches!(error, ServerError::Extraction(ExtractionError::Normalize(_))));
}
