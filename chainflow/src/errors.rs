//! Error types for chainflow pipelines and their collaborators.
//!
//! Collaborator failures keep their kind end to end: the runner wraps them
//! without reclassifying, so a caller can still tell a quota failure from an
//! authentication failure after a run aborts.

use crate::core::PipelineRun;
use thiserror::Error;

/// Failure signalled by a text-completion backend.
#[derive(Debug, Clone, Error)]
pub enum DelegationError {
    /// The backend rejected the caller's credentials.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The caller exhausted its request or token quota.
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The backend did not answer within its deadline.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The backend answered with something that could not be decoded.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The requested model identifier is not known to the backend.
    #[error("unknown backend '{backend}'")]
    UnknownBackend {
        /// The unrecognised model identifier.
        backend: String,
    },
}

impl DelegationError {
    /// Returns a short, stable name for the error kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "authentication",
            Self::QuotaExceeded(_) => "quota_exceeded",
            Self::Timeout(_) => "timeout",
            Self::MalformedResponse(_) => "malformed_response",
            Self::UnknownBackend { .. } => "unknown_backend",
        }
    }
}

/// Failure signalled by a model catalog.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// The catalog rejected the caller's credentials.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The requested region offers no catalog.
    #[error("region '{region}' is not available")]
    RegionUnavailable {
        /// The unavailable region identifier.
        region: String,
    },
}

/// Error raised when a pipeline definition is invalid.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PipelineValidationError {
    /// The error message.
    pub message: String,
    /// The stages involved in the error.
    pub stages: Vec<String>,
}

impl PipelineValidationError {
    /// Creates a new pipeline validation error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stages: Vec::new(),
        }
    }

    /// Sets the stages involved.
    #[must_use]
    pub fn with_stages(mut self, stages: Vec<String>) -> Self {
        self.stages = stages;
        self
    }
}

/// Error raised when a pipeline run stops before completing every stage.
///
/// Both variants carry the partial [`PipelineRun`]: every stage result
/// recorded up to the stopping point, in execution order.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage's delegation failed; no later stage was started.
    #[error("stage '{stage}' failed: {source}")]
    StageFailed {
        /// The stage whose delegation failed.
        stage: String,
        /// The partial run, ending with the failed stage's result.
        run: PipelineRun,
        /// The backend failure, unchanged in kind.
        #[source]
        source: DelegationError,
    },

    /// The run was cancelled between stages.
    #[error("cancelled before stage '{stage}': {reason}")]
    Cancelled {
        /// The stage that was about to start.
        stage: String,
        /// The partial run of stages completed before cancellation.
        run: PipelineRun,
        /// The cancellation reason.
        reason: String,
    },
}

impl PipelineError {
    /// Returns the partial run recorded before the pipeline stopped.
    #[must_use]
    pub fn run(&self) -> &PipelineRun {
        match self {
            Self::StageFailed { run, .. } | Self::Cancelled { run, .. } => run,
        }
    }

    /// Consumes the error, returning the partial run.
    #[must_use]
    pub fn into_run(self) -> PipelineRun {
        match self {
            Self::StageFailed { run, .. } | Self::Cancelled { run, .. } => run,
        }
    }
}
