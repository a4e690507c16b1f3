//! Request dispatch over a registry of named capabilities.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capability::Capability;
use crate::extraction::ExtractionError;
use crate::types::ParameterSet;

/// A request for one capability on one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Registry key of the capability.
    pub capability: String,
    /// Input text handed to the capability.
    pub input: String,
}

impl Request {
    /// Creates a request.
    #[must_use]
    pub fn new(capability: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
            input: input.into(),
        }
    }
}

/// Errors from request dispatch.
#[derive(Debug, Error)]
pub enum ServerError {
    /// No capability is registered under the requested name.
    #[error("Unknown capability: {0}")]
    UnknownCapability(String),

    /// The capability itself failed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Keyed lookup of capabilities, populated at startup.
#[derive(Default)]
pub struct CapabilityServer {
    capabilities: HashMap<String, Box<dyn Capability>>,
}

impl CapabilityServer {
    /// Creates an empty server.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `capability` under its own name, replacing any previous one.
    pub fn register(&mut self, capability: impl Capability + 'static) -> &mut Self {
        let name = capability.name().to_string();
        if self.capabilities.insert(name.clone(), Box::new(capability)).is_some() {
            tracing::debug!(capability = %name, "Replaced registered capability");
        }
        self
    }

    /// Registers `capability` (fluent builder pattern).
    #[must_use]
    pub fn with_capability(mut self, capability: impl Capability + 'static) -> Self {
        self.register(capability);
        self
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.capabilities.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Dispatches `request` to its capability.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::UnknownCapability` for an unregistered name and
    /// `ServerError::Extraction` when the capability fails.
    pub async fn handle(&self, request: &Request) -> Result<ParameterSet, ServerError> {
        let capability = self
            .capabilities
            .get(&request.capability)
            .ok_or_else(|| ServerError::UnknownCapability(request.capability.clone()))?;

        Ok(capability.execute(&request.input).await?)
    }
}
