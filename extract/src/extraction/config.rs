//! Configuration for the retrying extraction strategy.

/// Configuration for the retry-validate loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Maximum number of generation attempts before falling back to the
    /// empty result (default: 3).
    pub max_retries: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { max_retries: 3 }
    }
}

impl ExtractionConfig {
    /// Set the maximum number of generation attempts.
    #[must_use]
    pub const fn with_max_retries(mut self, max: usize) -> Self {
        self.max_retries = max;
        self
    }
}
