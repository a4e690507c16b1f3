//! Mapping of raw model parameters onto canonical records.
//!
//! Normalization is pure: no model calls, no shared state, and the same raw
//! input always yields the same record.

use thiserror::Error;

use crate::types::{ParamType, Parameter, RawParameter};

/// A raw parameter that cannot be normalized.
///
/// This indicates a malformed upstream extraction and is never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The label is absent or blank.
    #[error("parameter {index} has no label")]
    MissingLabel {
        /// Position in the model's parameter list.
        index: usize,
    },

    /// The entry is not a parameter record at all.
    #[error("parameter {index} is malformed: {message}")]
    Malformed {
        /// Position in the model's parameter list.
        index: usize,
        /// Deserialization error.
        message: String,
    },
}

/// Label keywords mapped to a type. Order matters: the first matching rule
/// wins, so `"cache size mode"` is an integer.
const TYPE_RULES: &[(&[&str], ParamType)] = &[
    (&["size", "capacity"], ParamType::Integer),
    (&["enable", "support"], ParamType::Boolean),
    (&["mode", "type"], ParamType::Enum),
];

/// Evidence keyword (matched case-insensitively) and the constraint note it adds.
struct ConstraintRule {
    keyword: &'static str,
    note: &'static str,
}

/// Applied in order; every matching rule appends its note.
const CONSTRAINT_RULES: &[ConstraintRule] = &[ConstraintRule {
    keyword: "uniform",
    note: "must be uniform across the system",
}];

/// Normalizes the raw parameter at position `index` of the model's list.
///
/// # Errors
///
/// Returns `NormalizeError::MissingLabel` when the label is absent or blank.
pub fn normalize(raw: &RawParameter, index: usize) -> Result<Parameter, NormalizeError> {
    let label = raw
        .label
        .as_deref()
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .ok_or(NormalizeError::MissingLabel { index })?;

    let lowered = label.to_lowercase();

    Ok(Parameter {
        name: slugify(label),
        description: capitalize_first(label),
        param_type: infer_type(&lowered),
        constraints: infer_constraints(raw.evidence()),
    })
}

/// Lowercased, trimmed label with spaces replaced by underscores.
#[must_use]
pub fn slugify(label: &str) -> String {
    label.trim().to_lowercase().replace(' ', "_")
}

/// Infers a type from a lowercased label.
#[must_use]
pub fn infer_type(lowered_label: &str) -> ParamType {
    TYPE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered_label.contains(k)))
        .map_or(ParamType::Structure, |(_, param_type)| *param_type)
}

/// Collects constraint notes implied by the evidence text.
#[must_use]
pub fn infer_constraints(evidence: &str) -> Vec<String> {
    let lowered = evidence.to_lowercase();
    CONSTRAINT_RULES
        .iter()
        .filter(|rule| lowered.contains(rule.keyword))
        .map(|rule| rule.note.to_string())
        .collect()
}

fn capitalize_first(label: &str) -> String {
    let mut chars = label.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_cache_size() {
        let raw = RawParameter::new("cache size", "uniform across cores");
        let parameter = normalize(&raw, 0).unwrap();

        assert_eq!(parameter.name, "cache_size");
        assert_eq!(parameter.description, "Cache size");
        assert_eq!(parameter.param_type, ParamType::Integer);
        assert_eq!(parameter.constraints, vec!["must be uniform across the system"]);
    }

    #[test]
    fn name_is_lowercase_slug_without_spaces() {
        for label in ["  Vector Register LENGTH ", "ELEN", "Misaligned access support", "a b  c"] {
            let name = normalize(&RawParameter::new(label, ""), 0).unwrap().name;
            assert!(!name.contains(' '), "{name}");
            assert_eq!(name, name.to_lowercase());
        }
    }

    #[test]
    fn equal_labels_yield_equal_records() {
        let raw = RawParameter::new("Reservation set size", "Uniform");
        assert_eq!(normalize(&raw, 0), normalize(&raw.clone(), 3));
    }

    #[test]
    fn type_precedence_follows_rule_order() {
        assert_eq!(infer_type("cache size mode"), ParamType::Integer);
        assert_eq!(infer_type("buffer capacity"), ParamType::Integer);
        assert_eq!(infer_type("enable support mode"), ParamType::Boolean);
        assert_eq!(infer_type("misaligned access support"), ParamType::Boolean);
        assert_eq!(infer_type("rounding mode"), ParamType::Enum);
        assert_eq!(infer_type("trap type"), ParamType::Enum);
        assert_eq!(infer_type("pmp granularity"), ParamType::Structure);
    }

    #[test]
    fn type_is_inferred_case_insensitively() {
        let parameter = normalize(&RawParameter::new("Cache SIZE", ""), 0).unwrap();
        assert_eq!(parameter.param_type, ParamType::Integer);
    }

    #[test]
    fn uniform_constraint_is_case_insensitive() {
        assert_eq!(infer_constraints("Must be Uniform across cores").len(), 1);
        assert!(infer_constraints("varies per core").is_empty());
        assert!(infer_constraints("").is_empty());
    }

    #[test]
    fn description_capitalizes_only_first_character() {
        let parameter = normalize(&RawParameter::new(" vLEN in bits", ""), 0).unwrap();
        assert_eq!(parameter.description, "VLEN in bits");
    }

    #[test]
    fn missing_or_blank_label_is_fatal() {
        let unlabeled = RawParameter {
            label: None,
            evidence: Some("uniform".to_string()),
        };
        assert_eq!(
            normalize(&unlabeled, 2),
            Err(NormalizeError::MissingLabel { index: 2 })
        );
        assert_eq!(
            normalize(&RawParameter::new("   ", ""), 0),
            Err(NormalizeError::MissingLabel { index: 0 })
        );
    }
}
