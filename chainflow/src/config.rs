//! Environment-backed configuration for the demo pipelines.
//!
//! Explicit config objects, built by the caller and passed in; the library
//! never reads the environment behind a caller's back.

use std::env;

/// Region used when the environment does not name one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Target region plus the per-stage model selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Region identifier for backend and catalog calls.
    pub region: String,
    /// Model used by the architecture stage.
    pub architecture_model: String,
    /// Model used by the development stage.
    pub development_model: String,
    /// Model used by the testing stage.
    pub testing_model: String,
    /// Model used by the documentation stage.
    pub documentation_model: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            architecture_model: "anthropic.claude-3-sonnet-20240229-v1:0".to_string(),
            development_model: "anthropic.claude-3-haiku-20240307-v1:0".to_string(),
            testing_model: "amazon.nova-lite-v1:0".to_string(),
            documentation_model: "amazon.titan-text-express-v1".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Reads configuration from the environment, falling back to defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            region: env_or("AWS_DEFAULT_REGION", &defaults.region),
            architecture_model: env_or("ARCHITECTURE_MODEL", &defaults.architecture_model),
            development_model: env_or("DEVELOPMENT_MODEL", &defaults.development_model),
            testing_model: env_or("TESTING_MODEL", &defaults.testing_model),
            documentation_model: env_or("DOCUMENTATION_MODEL", &defaults.documentation_model),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
