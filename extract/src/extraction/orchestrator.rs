//! Retry-validate loop for the fault-tolerant extraction strategy.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use super::config::ExtractionConfig;
use super::error::ExtractionError;
use super::metrics::ExtractionMetrics;
use super::refine::{names_only, parse_validated, request_refinement};
use super::sanitize::sanitize;
use super::validate::SchemaValidator;
use crate::generate::GenerationError;
use crate::prompt::PromptTemplate;
use crate::types::ParameterSet;

/// States of the retry-validate loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionState {
    /// Waiting on a generation call.
    Attempting,
    /// Stripping code fences.
    Sanitizing,
    /// Parsing JSON.
    Parsing,
    /// Checking the schema.
    Validating,
    /// Enriching a names-only response.
    Refining,
    /// A result was accepted.
    Succeeded,
    /// All attempts failed; the empty set was returned.
    ExhaustedFallback,
}

impl fmt::Display for ExtractionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Attempting => "attempting",
            Self::Sanitizing => "sanitizing",
            Self::Parsing => "parsing",
            Self::Validating => "validating",
            Self::Refining => "refining",
            Self::Succeeded => "succeeded",
            Self::ExhaustedFallback => "exhausted_fallback",
        };
        f.write_str(name)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The model returned nothing; treated as "no parameters".
    EmptyOutput,
    /// A response passed validation directly.
    Validated,
    /// A names-only response was refined.
    Refined,
    /// The retry budget ran out.
    Exhausted,
}

/// Why an attempt was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// Output was not JSON.
    Parse(String),
    /// Output violated the schema.
    Schema(Vec<String>),
    /// Output passed the schema but is not a parameter set.
    Decode(String),
}

/// Record of one rejected attempt.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    /// The attempt number (1-indexed).
    pub attempt_number: usize,
    /// Why it was rejected.
    pub failure: AttemptFailure,
    /// Raw model output.
    pub raw_output: String,
    /// Elapsed time at this attempt.
    pub elapsed: Duration,
}

/// Result of a run together with its diagnostics.
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// The validated result, or the canonical empty set.
    pub parameters: ParameterSet,
    /// How the run ended.
    pub outcome: Outcome,
    /// Rejected attempts, in order.
    pub history: Vec<AttemptRecord>,
    /// Call counts, timing, and token estimates.
    pub metrics: ExtractionMetrics,
}

/// Drives bounded generation attempts until a schema-valid result appears.
///
/// Every attempt reuses the same prompt. Parse failures and schema
/// violations are retried; an empty response ends the run with the empty
/// set; a names-only response is handed to the refinement pass, whose result
/// or error ends the run. Exhaustion yields the empty set, never an error.
#[derive(Clone)]
pub struct ExtractionOrchestrator {
    validator: SchemaValidator,
    refine_template: PromptTemplate,
    config: ExtractionConfig,
}

impl ExtractionOrchestrator {
    /// Creates an orchestrator with the built-in refinement template and
    /// default configuration.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::SchemaError` if the schema does not compile.
    pub fn new(schema: &Value) -> Result<Self, ExtractionError> {
        Ok(Self::from_validator(SchemaValidator::new(schema)?))
    }

    /// Creates an orchestrator around an already compiled schema.
    #[must_use]
    pub fn from_validator(validator: SchemaValidator) -> Self {
        Self {
            validator,
            refine_template: PromptTemplate::default_refinement(),
            config: ExtractionConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the maximum number of attempts (fluent builder pattern).
    #[must_use]
    pub const fn max_retries(mut self, max: usize) -> Self {
        self.config.max_retries = max;
        self
    }

    /// Replaces the refinement template.
    #[must_use]
    pub fn with_refine_template(mut self, template: PromptTemplate) -> Self {
        self.refine_template = template;
        self
    }

    /// Runs the loop and returns only the result.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::Backend` if the generate function fails, and
    /// any error raised by the refinement pass.
    pub async fn run<F, Fut, B>(
        &self,
        generate: F,
        build_prompt: B,
    ) -> Result<ParameterSet, ExtractionError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<String, GenerationError>>,
        B: FnOnce() -> String,
    {
        self.run_detailed(generate, build_prompt)
            .await
            .map(|report| report.parameters)
    }

    /// Runs the loop and returns the result with attempt history and metrics.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub async fn run_detailed<F, Fut, B>(
        &self,
        generate: F,
        build_prompt: B,
    ) -> Result<ExtractionReport, ExtractionError>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<String, GenerationError>>,
        B: FnOnce() -> String,
    {
        let start = Instant::now();
        let max_attempts = self.config.max_retries;
        let mut history: Vec<AttemptRecord> = Vec::new();
        let mut metrics = ExtractionMetrics::default();

        let prompt = build_prompt();

        for attempt in 1..=max_attempts {
            trace_state(ExtractionState::Attempting, attempt, max_attempts);
            let raw = generate(prompt.clone())
                .await
                .map_err(|source| ExtractionError::Backend {
                    call: attempt,
                    source,
                })?;
            metrics.record_call(&prompt, &raw);

            if raw.trim().is_empty() {
                tracing::debug!(attempt, "Empty model output, treating as no parameters");
                return Ok(finish(ParameterSet::empty(), Outcome::EmptyOutput, history, metrics, start));
            }

            trace_state(ExtractionState::Sanitizing, attempt, max_attempts);
            let cleaned = sanitize(&raw);

            trace_state(ExtractionState::Parsing, attempt, max_attempts);
            let parsed = match serde_json::from_str::<Value>(&cleaned) {
                Ok(value) => value,
                Err(e) => {
                    tracing::debug!(attempt, error = %e, "Model output is not JSON, retrying");
                    history.push(AttemptRecord {
                        attempt_number: attempt,
                        failure: AttemptFailure::Parse(e.to_string()),
                        raw_output: raw,
                        elapsed: start.elapsed(),
                    });
                    continue;
                }
            };

            trace_state(ExtractionState::Validating, attempt, max_attempts);
            let failure = match self.accept(parsed.clone()) {
                Ok(parameters) => {
                    trace_state(ExtractionState::Succeeded, attempt, max_attempts);
                    return Ok(finish(parameters, Outcome::Validated, history, metrics, start));
                }
                Err(failure) => failure,
            };

            if let Some(names) = names_only(&parsed) {
                trace_state(ExtractionState::Refining, attempt, max_attempts);
                let (refine_prompt, refine_raw) =
                    request_refinement(&generate, &names, &self.refine_template, attempt + 1).await?;
                metrics.record_call(&refine_prompt, &refine_raw);
                let parameters = parse_validated(&sanitize(&refine_raw), &self.validator)?;
                trace_state(ExtractionState::Succeeded, attempt, max_attempts);
                return Ok(finish(parameters, Outcome::Refined, history, metrics, start));
            }

            tracing::debug!(attempt, failure = ?failure, "Model output rejected, retrying");
            history.push(AttemptRecord {
                attempt_number: attempt,
                failure,
                raw_output: raw,
                elapsed: start.elapsed(),
            });
        }

        tracing::warn!(
            state = %ExtractionState::ExhaustedFallback,
            max_attempts,
            "No valid output after all attempts, falling back to empty result"
        );
        Ok(finish(ParameterSet::empty(), Outcome::Exhausted, history, metrics, start))
    }

    fn accept(&self, parsed: Value) -> Result<ParameterSet, AttemptFailure> {
        self.validator
            .validate(&parsed)
            .map_err(|violation| AttemptFailure::Schema(violation.errors))?;
        serde_json::from_value(parsed).map_err(|e| AttemptFailure::Decode(e.to_string()))
    }
}

fn trace_state(state: ExtractionState, attempt: usize, max_attempts: usize) {
    tracing::debug!(state = %state, attempt, max_attempts, "Extraction state");
}

fn finish(
    parameters: ParameterSet,
    outcome: Outcome,
    history: Vec<AttemptRecord>,
    mut metrics: ExtractionMetrics,
    start: Instant,
) -> ExtractionReport {
    metrics.wall_time = start.elapsed();
    ExtractionReport {
        parameters,
        outcome,
        history,
        metrics,
    }
}
