//! Extraction of implementation parameters from specification snippets.
//!
//! The crate turns unreliable free-form model output into schema-conformant
//! [`ParameterSet`](types::ParameterSet)s. Model backends plug in through
//! [`TextGenerator`](generate::TextGenerator); the schema and prompt
//! templates are injected by the caller.

pub mod capability;
pub mod extraction;
pub mod generate;
pub mod prompt;
pub mod server;
pub mod triggers;
pub mod types;

/// Common traits and types for ergonomic usage of the pipeline.
pub mod prelude {
    pub use crate::capability::{Capability, ExtractParameters, Strategy};
    pub use crate::extraction::{
        ExtractionConfig, ExtractionError, ExtractionMetrics, ExtractionOrchestrator,
        ExtractionReport, Outcome, SchemaValidator, SchemaViolation,
    };
    pub use crate::generate::{GenerationError, TextGenerator};
    pub use crate::prompt::PromptTemplate;
    pub use crate::server::{CapabilityServer, Request, ServerError};
    pub use crate::types::{ParamType, Parameter, ParameterSet, RawParameter};
}
