//! The validation and normalization pipeline.
//!
//! Two strategies coexist with different error contracts:
//!
//! - [`single_shot::extract`] - one generation call, normalization of raw
//!   `{label, evidence}` records, and a schema check whose failure is returned
//! - [`ExtractionOrchestrator`] - bounded retries against the schema, a
//!   refinement pass for names-only answers, and an empty-set fallback
//!
//! Both are built from [`sanitize`], [`SchemaValidator`], and [`normalize`].

pub mod config;
pub mod error;
pub mod metrics;
pub mod normalize;
pub mod orchestrator;
pub mod refine;
pub mod sanitize;
pub mod single_shot;
pub mod validate;

pub use config::ExtractionConfig;
pub use error::ExtractionError;
pub use metrics::{ExtractionMetrics, estimate_tokens};
pub use normalize::{NormalizeError, normalize};
pub use orchestrator::{
    AttemptFailure, AttemptRecord, ExtractionOrchestrator, ExtractionReport, ExtractionState,
    Outcome,
};
pub use refine::{names_only, refine};
pub use sanitize::sanitize;
pub use single_shot::extract;
pub use validate::{SchemaValidator, SchemaViolation, validate};
