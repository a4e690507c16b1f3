//! Schema validation of candidate results.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use super::error::ExtractionError;
use crate::types::ParameterSet;

/// A candidate object did not conform to the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("schema violation: {}", .errors.join("; "))]
pub struct SchemaViolation {
    /// Every validation error, each prefixed with its instance path.
    pub errors: Vec<String>,
}

/// A compiled schema, cheap to clone and shared across extraction calls.
#[derive(Clone)]
pub struct SchemaValidator {
    schema: Arc<Value>,
    validator: Arc<jsonschema::Validator>,
}

impl SchemaValidator {
    /// Compiles `schema`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractionError::SchemaError` if the schema does not compile.
    pub fn new(schema: &Value) -> Result<Self, ExtractionError> {
        let validator = jsonschema::Validator::new(schema)
            .map_err(|e| ExtractionError::SchemaError(e.to_string()))?;
        Ok(Self {
            schema: Arc::new(schema.clone()),
            validator: Arc::new(validator),
        })
    }

    /// Validator for the schema derived from [`ParameterSet`].
    pub fn for_parameter_set() -> Result<Self, ExtractionError> {
        Self::new(&ParameterSet::json_schema())
    }

    /// The schema this validator was compiled from.
    #[must_use]
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Checks `instance`, collecting all failures rather than the first.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaViolation> {
        let errors: Vec<String> = self
            .validator
            .iter_errors(instance)
            .map(|error| format!("At path '{}': {}", error.instance_path, error))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaViolation { errors })
        }
    }

    /// Checks an assembled result.
    pub fn validate_set(&self, set: &ParameterSet) -> Result<(), SchemaViolation> {
        let instance = serde_json::to_value(set).map_err(|e| SchemaViolation {
            errors: vec![format!("Serialization failed: {e}")],
        })?;
        self.validate(&instance)
    }
}

/// One-off validation of `instance` against `schema`.
///
/// # Errors
///
/// Returns `ExtractionError::SchemaError` for an uncompilable schema and
/// `ExtractionError::SchemaViolation` for a non-conforming instance.
pub fn validate(instance: &Value, schema: &Value) -> Result<(), ExtractionError> {
    SchemaValidator::new(schema)?.validate(instance)?;
    Ok(())
}
