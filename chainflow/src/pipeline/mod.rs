//! Pipeline building and sequential execution.
//!
//! A pipeline is a simple chain, not a DAG: stage i+1 never starts until
//! stage i completed successfully, because its prompt embeds the literal
//! output of earlier stages.

use crate::backend::{CompletionBackend, CompletionRequest};
use crate::cancellation::CancellationToken;
use crate::core::{PipelineRun, PriorOutputs, StageResult};
use crate::errors::{PipelineError, PipelineValidationError};
use crate::stage::Stage;
use chrono::Utc;
use std::collections::HashSet;
use tracing::{info, warn};

#[cfg(test)]
mod integration_tests;

/// Builder for pipelines with name validation.
#[derive(Debug)]
pub struct PipelineBuilder {
    name: String,
    stages: Vec<Stage>,
    seen: HashSet<String>,
}

impl PipelineBuilder {
    /// Creates a new pipeline builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Appends a stage to the chain.
    ///
    /// # Errors
    ///
    /// Returns an error if a stage with the same name was already added.
    pub fn stage(mut self, stage: Stage) -> Result<Self, PipelineValidationError> {
        if !self.seen.insert(stage.name().to_string()) {
            return Err(PipelineValidationError::new(format!(
                "duplicate stage name '{}'",
                stage.name()
            ))
            .with_stages(vec![stage.name().to_string()]));
        }
        self.stages.push(stage);
        Ok(self)
    }

    /// Builds the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder has no stages.
    pub fn build(self) -> Result<Pipeline, PipelineValidationError> {
        if self.stages.is_empty() {
            return Err(PipelineValidationError::new("pipeline has no stages"));
        }
        Ok(Pipeline {
            name: self.name,
            stages: self.stages,
        })
    }
}

/// An ordered chain of stages delegating to a completion backend.
#[derive(Debug)]
pub struct Pipeline {
    name: String,
    stages: Vec<Stage>,
}

impl Pipeline {
    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Returns the stage names in declared order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(Stage::name).collect()
    }

    /// Runs every stage in declared order against `backend`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::StageFailed`] on the first backend failure,
    /// carrying the partial run; no later stage is started and no retry is
    /// attempted.
    pub async fn run(
        &self,
        backend: &dyn CompletionBackend,
    ) -> Result<PipelineRun, PipelineError> {
        let token = CancellationToken::new();
        self.run_with_cancellation(backend, &token).await
    }

    /// Runs the pipeline, checking `token` before each stage.
    ///
    /// A stage already in flight is never interrupted; cancellation takes
    /// effect at the next stage boundary.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::StageFailed`] on backend failure or
    /// [`PipelineError::Cancelled`] when the token was cancelled, both
    /// carrying the partial run.
    pub async fn run_with_cancellation(
        &self,
        backend: &dyn CompletionBackend,
        token: &CancellationToken,
    ) -> Result<PipelineRun, PipelineError> {
        let run_started = Utc::now();
        let mut results: Vec<StageResult> = Vec::with_capacity(self.stages.len());
        let mut outputs = PriorOutputs::new();

        for stage in &self.stages {
            if token.is_cancelled() {
                let reason = token
                    .reason()
                    .unwrap_or_else(|| "cancellation requested".to_string());
                warn!(
                    pipeline = %self.name,
                    stage = %stage.name(),
                    reason = %reason,
                    "pipeline cancelled"
                );
                return Err(PipelineError::Cancelled {
                    stage: stage.name().to_string(),
                    run: PipelineRun::new(&self.name, run_started, results),
                    reason,
                });
            }

            let prompt = stage.render(&outputs);
            let mut request = CompletionRequest::new(stage.backend(), prompt);
            if let Some(system) = stage.system_instruction() {
                request = request.with_system(system);
            }

            info!(
                pipeline = %self.name,
                stage = %stage.name(),
                backend = %stage.backend(),
                "stage started"
            );
            let started_at = Utc::now();

            match backend.complete(&request).await {
                Ok(text) => {
                    let result = StageResult::completed(stage.name(), started_at, text.clone());
                    info!(
                        pipeline = %self.name,
                        stage = %stage.name(),
                        duration_secs = result.duration_secs(),
                        "stage completed"
                    );
                    outputs.insert(stage.name(), text);
                    results.push(result);
                }
                Err(err) => {
                    let result = StageResult::failed(stage.name(), started_at, err.to_string());
                    warn!(
                        pipeline = %self.name,
                        stage = %stage.name(),
                        kind = err.kind(),
                        duration_secs = result.duration_secs(),
                        "stage failed"
                    );
                    results.push(result);
                    return Err(PipelineError::StageFailed {
                        stage: stage.name().to_string(),
                        run: PipelineRun::new(&self.name, run_started, results),
                        source: err,
                    });
                }
            }
        }

        let run = PipelineRun::new(&self.name, run_started, results);
        info!(
            pipeline = %self.name,
            run_id = %run.run_id,
            total_secs = run.total_duration_secs(),
            "pipeline completed"
        );
        Ok(run)
    }
}
