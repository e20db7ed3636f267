//! Backend doubles for tests and offline demos.

use crate::backend::{CompletionBackend, CompletionRequest};
use crate::errors::DelegationError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

/// A backend that replays a queue of scripted outcomes and records every
/// request it receives.
///
/// When the queue runs dry, further calls fail with a malformed-response
/// error.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    outcomes: Mutex<VecDeque<Result<String, DelegationError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBackend {
    /// Creates a backend with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn push_response(&self, text: impl Into<String>) {
        self.outcomes.lock().push_back(Ok(text.into()));
    }

    /// Queues a failure.
    pub fn push_failure(&self, error: DelegationError) {
        self.outcomes.lock().push_back(Err(error));
    }

    /// Returns every request received so far, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }

    /// Returns the number of completion calls received.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, DelegationError> {
        self.requests.lock().push(request.clone());
        self.outcomes.lock().pop_front().unwrap_or_else(|| {
            Err(DelegationError::MalformedResponse(
                "no scripted outcome left".to_string(),
            ))
        })
    }
}

/// A backend with a fixed response per model identifier.
///
/// Requests for unmapped models fail with an unknown-backend error.
#[derive(Debug, Clone, Default)]
pub struct CannedBackend {
    responses: HashMap<String, String>,
}

impl CannedBackend {
    /// Creates a backend with no canned responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a model identifier to a fixed response.
    #[must_use]
    pub fn with_response(mut self, model: impl Into<String>, text: impl Into<String>) -> Self {
        self.responses.insert(model.into(), text.into());
        self
    }
}

#[async_trait]
impl CompletionBackend for CannedBackend {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, DelegationError> {
        self.responses
            .get(&request.model)
            .cloned()
            .ok_or_else(|| DelegationError::UnknownBackend {
                backend: request.model.clone(),
            })
    }
}

/// A backend that sleeps before answering with a fixed text.
#[derive(Debug, Clone)]
pub struct SlowBackend {
    delay: Duration,
    text: String,
}

impl SlowBackend {
    /// Creates a backend that waits `delay` before each response.
    #[must_use]
    pub fn new(delay: Duration, text: impl Into<String>) -> Self {
        Self {
            delay,
            text: text.into(),
        }
    }

    /// Creates a slow backend with delay in milliseconds.
    #[must_use]
    pub fn with_delay_ms(ms: u64, text: impl Into<String>) -> Self {
        Self::new(Duration::from_millis(ms), text)
    }
}

#[async_trait]
impl CompletionBackend for SlowBackend {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, DelegationError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.text.clone())
    }
}

/// A backend that always fails with a fixed error.
#[derive(Debug, Clone)]
pub struct FailingBackend {
    error: DelegationError,
}

impl FailingBackend {
    /// Creates a backend that fails every call with `error`.
    #[must_use]
    pub fn new(error: DelegationError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl CompletionBackend for FailingBackend {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, DelegationError> {
        Err(self.error.clone())
    }
}
