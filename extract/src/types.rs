//! Parameter records produced and consumed by the extraction pipeline.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A parameter as the model reports it, before normalization.
///
/// `label` is optional at the serde level so that a record without one
/// reaches the normalizer and fails there with a typed error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParameter {
    /// Free-text label, e.g. `"cache size"`.
    #[serde(default)]
    pub label: Option<String>,
    /// Supporting text quoted from the snippet.
    #[serde(default)]
    pub evidence: Option<String>,
}

impl RawParameter {
    /// Creates a raw parameter with a label and evidence text.
    #[must_use]
    pub fn new(label: impl Into<String>, evidence: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            evidence: Some(evidence.into()),
        }
    }

    /// Evidence text, empty when the model omitted it.
    #[must_use]
    pub fn evidence(&self) -> &str {
        self.evidence.as_deref().unwrap_or_default()
    }
}

/// Inferred value type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Numeric quantity such as a size or capacity.
    Integer,
    /// Feature switch such as an enable or support flag.
    Boolean,
    /// One of a closed set of modes or types.
    Enum,
    /// Anything else.
    Structure,
}

impl ParamType {
    /// Lowercase name as it appears in serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Enum => "enum",
            Self::Structure => "structure",
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized, schema-shaped parameter record.
///
/// Fields beyond the four below are ignored when decoding; whether they are
/// allowed at all is up to the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Parameter {
    /// Slug derived from the label (`cache_size`).
    pub name: String,
    /// Human-readable label (`Cache size`).
    pub description: String,
    /// Inferred value type.
    #[serde(rename = "type")]
    pub param_type: ParamType,
    /// Constraint notes, in the order they were inferred.
    pub constraints: Vec<String>,
}

/// The top-level extraction result.
///
/// `{"parameters": []}` is a valid terminal value, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ParameterSet {
    /// Extracted parameters in model order.
    pub parameters: Vec<Parameter>,
}

impl ParameterSet {
    /// The canonical empty result.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            parameters: Vec::new(),
        }
    }

    /// Whether no parameters were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// JSON Schema derived from this type, used when no schema file is supplied.
    #[must_use]
    pub fn json_schema() -> Value {
        json!(schemars::schema_for!(Self))
    }
}

impl From<Vec<Parameter>> for ParameterSet {
    fn from(parameters: Vec<Parameter>) -> Self {
        Self { parameters }
    }
}
