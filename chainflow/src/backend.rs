//! The text-completion collaborator boundary.
//!
//! Chainflow does not implement any vendor's model-invocation protocol. The
//! runner talks to whatever [`CompletionBackend`] the caller supplies; the
//! [`testing`](crate::testing) module ships in-memory implementations for
//! tests and offline demos.

use crate::errors::DelegationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single completion request handed to a backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model identifier to delegate to.
    pub model: String,
    /// Optional system instruction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// The rendered prompt text.
    pub prompt: String,
}

impl CompletionRequest {
    /// Creates a request without a system instruction.
    #[must_use]
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: None,
            prompt: prompt.into(),
        }
    }

    /// Sets the system instruction.
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

/// Trait for text-completion collaborators.
///
/// A backend accepts a model identifier, an optional system instruction, and
/// a prompt, and returns completion text or a [`DelegationError`]. The
/// runner treats the call as opaque and blocking; it neither retries nor
/// reclassifies failures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Delegates one completion request.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, DelegationError>;
}
