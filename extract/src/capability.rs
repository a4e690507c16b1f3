//! Named capabilities served by the dispatch layer.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::extraction::{
    ExtractionConfig, ExtractionError, ExtractionOrchestrator, SchemaValidator, single_shot,
};
use crate::generate::TextGenerator;
use crate::prompt::PromptTemplate;
use crate::triggers::{contains_parameter_triggers, must_have_parameters};
use crate::types::ParameterSet;

/// A unit of work addressable by name.
#[async_trait]
pub trait Capability: Send + Sync {
    /// Registry key, e.g. `"extract_parameters"`.
    fn name(&self) -> &str;

    /// Runs the capability on one input.
    async fn execute(&self, input: &str) -> Result<ParameterSet, ExtractionError>;
}

/// Which extraction strategy a capability uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strategy {
    /// One call, normalization, strict validation.
    #[default]
    SingleShot,
    /// Bounded retries with refinement and an empty fallback.
    Retry,
}

/// Extracts parameters from a specification snippet.
pub struct ExtractParameters {
    generator: Arc<dyn TextGenerator>,
    validator: SchemaValidator,
    extract_template: PromptTemplate,
    refine_template: PromptTemplate,
    strategy: Strategy,
    config: ExtractionConfig,
}

impl ExtractParameters {
    /// Registry key of this capability.
    pub const NAME: &'static str = "extract_parameters";

    /// Creates the capability with built-in templates and the single-shot
    /// strategy.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::SchemaError` if the schema does not compile.
    pub fn new(generator: Arc<dyn TextGenerator>, schema: &Value) -> Result<Self, ExtractionError> {
        Ok(Self {
            generator,
            validator: SchemaValidator::new(schema)?,
            extract_template: PromptTemplate::default_extraction(),
            refine_template: PromptTemplate::default_refinement(),
            strategy: Strategy::default(),
            config: ExtractionConfig::default(),
        })
    }

    /// Replaces the extraction template.
    #[must_use]
    pub fn with_extract_template(mut self, template: PromptTemplate) -> Self {
        self.extract_template = template;
        self
    }

    /// Replaces the refinement template.
    #[must_use]
    pub fn with_refine_template(mut self, template: PromptTemplate) -> Self {
        self.refine_template = template;
        self
    }

    /// Selects the extraction strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replaces the retry configuration.
    #[must_use]
    pub const fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// The strategy in use.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }
}

#[async_trait]
impl Capability for ExtractParameters {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn execute(&self, input: &str) -> Result<ParameterSet, ExtractionError> {
        let generator = self.generator.as_ref();
        let generate = move |prompt: String| async move { generator.generate(&prompt).await };

        tracing::debug!(
            backend = generator.backend_name(),
            strategy = ?self.strategy,
            "Extracting parameters"
        );

        let result = match self.strategy {
            Strategy::SingleShot => {
                single_shot::extract(generate, input, &self.validator, Some(&self.extract_template))
                    .await?
            }
            Strategy::Retry => {
                let report = ExtractionOrchestrator::from_validator(self.validator.clone())
                    .with_config(self.config.clone())
                    .with_refine_template(self.refine_template.clone())
                    .run_detailed(generate, || self.extract_template.render_input(input))
                    .await?;
                tracing::debug!(
                    outcome = ?report.outcome,
                    calls = report.metrics.total_calls,
                    wall_time_ms = report.metrics.wall_time.as_millis(),
                    "Retry extraction finished"
                );
                report.parameters
            }
        };

        tracing::debug!(
            parameters = result.len(),
            has_triggers = contains_parameter_triggers(input),
            "Extraction finished"
        );
        if result.is_empty() && must_have_parameters(input) {
            tracing::warn!("Snippet marks behaviour as implementation-defined but no parameters were extracted");
        }

        Ok(result)
    }
}
