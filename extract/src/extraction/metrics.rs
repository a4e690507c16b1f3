//! Metrics tracking and token estimation for extraction runs.

use std::time::Duration;

/// Metrics collected during one orchestrator run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionMetrics {
    /// Generation calls made, refinement included.
    pub total_calls: usize,
    /// Wall-clock time elapsed during the run.
    pub wall_time: Duration,
    /// Estimated input tokens sent to the backend.
    pub estimated_input_tokens: usize,
    /// Estimated output tokens received from the backend.
    pub estimated_output_tokens: usize,
}

impl ExtractionMetrics {
    /// Accounts for one generation call.
    pub fn record_call(&mut self, prompt: &str, output: &str) {
        self.total_calls += 1;
        self.estimated_input_tokens += estimate_tokens(prompt);
        self.estimated_output_tokens += estimate_tokens(output);
    }
}

/// Estimate token count from text using the 4-chars-per-token heuristic.
///
/// Counts `chars()`, not bytes, and rounds up.
///
/// # Examples
///
/// ```
/// use param_extract::extraction::estimate_tokens;
///
/// assert_eq!(estimate_tokens("hello"), 2);
/// assert_eq!(estimate_tokens("hello world"), 3);
/// ```
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens("hello 世界"), 2);
    }

    #[test]
    fn test_record_call_accumulates() {
        let mut metrics = ExtractionMetrics::default();
        metrics.record_call("abcdefgh", "abc");
        metrics.record_call("abcd", "");

        assert_eq!(metrics.total_calls, 2);
        assert_eq!(metrics.estimated_input_tokens, 3);
        assert_eq!(metrics.estimated_output_tokens, 1);
    }
}
