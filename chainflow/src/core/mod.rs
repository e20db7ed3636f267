//! Core result types produced by pipeline execution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Terminal status of a stage execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    /// Stage completed successfully.
    Completed,
    /// Stage failed.
    Failed,
}

impl std::fmt::Display for StageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Outputs of completed stages, keyed by stage name.
///
/// Prompt templates read from this map to embed earlier stage output
/// verbatim. Execution order lives in [`PipelineRun::results`], not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorOutputs {
    outputs: HashMap<String, String>,
}

impl PriorOutputs {
    /// Creates an empty output map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed stage's output.
    pub fn insert(&mut self, stage: impl Into<String>, output: impl Into<String>) {
        self.outputs.insert(stage.into(), output.into());
    }

    /// Returns the output of a completed stage, if present.
    #[must_use]
    pub fn get(&self, stage: &str) -> Option<&str> {
        self.outputs.get(stage).map(String::as_str)
    }

    /// Returns true if the stage has a recorded output.
    #[must_use]
    pub fn contains(&self, stage: &str) -> bool {
        self.outputs.contains_key(stage)
    }

    /// Returns the number of recorded outputs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    /// Returns true if no outputs are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// Typed result of a single stage execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageResult {
    /// Stage name.
    pub name: String,
    /// Stage status.
    pub status: StageStatus,
    /// When the delegation started.
    pub started_at: DateTime<Utc>,
    /// When the delegation ended.
    pub ended_at: DateTime<Utc>,
    /// Output text, present on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error description, present on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StageResult {
    /// Creates a completed stage result ending now.
    #[must_use]
    pub fn completed(
        name: impl Into<String>,
        started_at: DateTime<Utc>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status: StageStatus::Completed,
            started_at,
            ended_at: Utc::now(),
            output: Some(output.into()),
            error: None,
        }
    }

    /// Creates a failed stage result ending now.
    #[must_use]
    pub fn failed(
        name: impl Into<String>,
        started_at: DateTime<Utc>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            status: StageStatus::Failed,
            started_at,
            ended_at: Utc::now(),
            output: None,
            error: Some(error.into()),
        }
    }

    /// Returns the duration in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        (self.ended_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Returns true if the stage succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, StageStatus::Completed)
    }

    /// Returns true if the stage failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self.status, StageStatus::Failed)
    }
}

/// The complete ordered record of a pipeline execution.
///
/// A run is produced whether the pipeline completed or stopped early; a
/// partial run simply ends at the stage that failed or was never started.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    /// Name of the pipeline that produced this run.
    pub pipeline: String,
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run ended.
    pub ended_at: DateTime<Utc>,
    /// Stage results in execution order.
    pub results: Vec<StageResult>,
}

impl PipelineRun {
    /// Creates a run record ending now, with a fresh run id.
    #[must_use]
    pub fn new(
        pipeline: impl Into<String>,
        started_at: DateTime<Utc>,
        results: Vec<StageResult>,
    ) -> Self {
        Self {
            pipeline: pipeline.into(),
            run_id: Uuid::new_v4(),
            started_at,
            ended_at: Utc::now(),
            results,
        }
    }

    /// Returns the total duration in seconds, summed over stage results.
    #[must_use]
    pub fn total_duration_secs(&self) -> f64 {
        self.results.iter().map(StageResult::duration_secs).sum()
    }

    /// Returns the outputs of every succeeded stage, keyed by stage name.
    #[must_use]
    pub fn outputs(&self) -> PriorOutputs {
        let mut outputs = PriorOutputs::new();
        for result in &self.results {
            if let Some(ref output) = result.output {
                outputs.insert(&result.name, output.clone());
            }
        }
        outputs
    }

    /// Returns the output of a named stage, if it succeeded.
    #[must_use]
    pub fn output_of(&self, stage: &str) -> Option<&str> {
        self.results
            .iter()
            .find(|r| r.name == stage)
            .and_then(|r| r.output.as_deref())
    }

    /// Returns true if every recorded stage succeeded.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.results.iter().all(StageResult::is_success)
    }

    /// Returns the number of recorded stage results.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.results.len()
    }

    /// Serialises the run to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
