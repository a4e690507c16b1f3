//! Keyword heuristics over snippet text.

/// Phrases suggesting a snippet may define implementation parameters.
const PARAMETER_TRIGGERS: &[&str] = &[
    "implementation-specific",
    "implementation defined",
    "implementation-defined",
    "optional",
    "optionally",
    "may",
    "might",
    "should",
    "shall",
];

/// Phrases that guarantee at least one implementation parameter.
const MANDATORY_TRIGGERS: &[&str] = &[
    "implementation-specific",
    "implementation defined",
    "implementation-defined",
];

/// Whether `text` contains any phrase that hints at a parameter.
#[must_use]
pub fn contains_parameter_triggers(text: &str) -> bool {
    contains_any(text, PARAMETER_TRIGGERS)
}

/// Whether `text` explicitly leaves something to the implementation.
#[must_use]
pub fn must_have_parameters(text: &str) -> bool {
    contains_any(text, MANDATORY_TRIGGERS)
}

fn contains_any(text: &str, phrases: &[&str]) -> bool {
    let lower = text.to_lowercase();
    phrases.iter().any(|phrase| lower.contains(phrase))
}
