//! Benchmark harness: times opaque command invocations in isolation.
//!
//! Unlike the staged pipeline, candidates are independent: a failing or
//! timed-out candidate never stops evaluation of the rest. The harness does
//! not look inside a candidate; it only times and classifies it.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{info, warn};

/// Default per-candidate timeout (five minutes).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// One command-style invocation to benchmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Display label for the candidate.
    pub label: String,
    /// Shell command to execute.
    pub command: String,
}

impl Candidate {
    /// Creates a new candidate.
    #[must_use]
    pub fn new(label: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            command: command.into(),
        }
    }
}

/// Classification of a candidate execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    /// The process exited with status zero.
    Succeeded,
    /// The process exited non-zero or could not be spawned.
    Failed,
    /// The process exceeded the configured timeout.
    TimedOut,
}

/// Timing record for one candidate execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateReport {
    /// Display label for the candidate.
    pub label: String,
    /// Execution classification.
    pub status: CandidateStatus,
    /// Process exit code, when the process ran to completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Wall-clock execution time in seconds.
    pub duration_secs: f64,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CandidateReport {
    /// Returns true if the candidate succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, CandidateStatus::Succeeded)
    }
}

/// Runs candidates one after another, each bounded by an absolute timeout.
#[derive(Debug, Clone)]
pub struct BenchmarkHarness {
    timeout: Duration,
    pause_between: Duration,
}

impl Default for BenchmarkHarness {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            pause_between: Duration::from_secs(2),
        }
    }
}

impl BenchmarkHarness {
    /// Creates a harness with the default timeout and inter-candidate pause.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-candidate timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the pause between consecutive candidates.
    #[must_use]
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause_between = pause;
        self
    }

    /// Executes every candidate in order, returning one report per candidate.
    pub async fn run(&self, candidates: &[Candidate]) -> Vec<CandidateReport> {
        let mut reports = Vec::with_capacity(candidates.len());
        for (index, candidate) in candidates.iter().enumerate() {
            if index > 0 && !self.pause_between.is_zero() {
                tokio::time::sleep(self.pause_between).await;
            }
            reports.push(self.run_candidate(candidate).await);
        }
        reports
    }

    async fn run_candidate(&self, candidate: &Candidate) -> CandidateReport {
        info!(
            label = %candidate.label,
            command = %candidate.command,
            "candidate started"
        );
        let start = Instant::now();
        let output = timeout(
            self.timeout,
            Command::new("sh")
                .arg("-c")
                .arg(&candidate.command)
                .kill_on_drop(true)
                .output(),
        )
        .await;
        let duration_secs = start.elapsed().as_secs_f64();

        match output {
            Ok(Ok(output)) => {
                let status = if output.status.success() {
                    CandidateStatus::Succeeded
                } else {
                    CandidateStatus::Failed
                };
                info!(
                    label = %candidate.label,
                    ?status,
                    duration_secs,
                    "candidate finished"
                );
                CandidateReport {
                    label: candidate.label.clone(),
                    status,
                    exit_code: output.status.code(),
                    duration_secs,
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }
            }
            Ok(Err(err)) => {
                warn!(label = %candidate.label, error = %err, "candidate could not be spawned");
                CandidateReport {
                    label: candidate.label.clone(),
                    status: CandidateStatus::Failed,
                    exit_code: None,
                    duration_secs,
                    stdout: String::new(),
                    stderr: err.to_string(),
                }
            }
            Err(_) => {
                warn!(
                    label = %candidate.label,
                    timeout_secs = self.timeout.as_secs_f64(),
                    "candidate timed out"
                );
                CandidateReport {
                    label: candidate.label.clone(),
                    status: CandidateStatus::TimedOut,
                    exit_code: None,
                    duration_secs: self.timeout.as_secs_f64(),
                    stdout: String::new(),
                    stderr: format!(
                        "timeout after {:.0} seconds",
                        self.timeout.as_secs_f64()
                    ),
                }
            }
        }
    }
}

/// Returns the fastest succeeding report, if any.
#[must_use]
pub fn fastest(reports: &[CandidateReport]) -> Option<&CandidateReport> {
    reports
        .iter()
        .filter(|r| r.is_success())
        .min_by(|a, b| {
            a.duration_secs
                .partial_cmp(&b.duration_secs)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn quick_harness() -> BenchmarkHarness {
        BenchmarkHarness::new().with_pause(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_successful_candidate() {
        let reports = quick_harness()
            .run(&[Candidate::new("echo", "echo hello")])
            .await;

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].status, CandidateStatus::Succeeded);
        assert_eq!(reports[0].exit_code, Some(0));
        assert_eq!(reports[0].stdout.trim(), "hello");
    }

    #[tokio::test]
    async fn test_failing_candidate_reports_exit_code() {
        let reports = quick_harness()
            .run(&[Candidate::new("fails", "exit 3")])
            .await;

        assert_eq!(reports[0].status, CandidateStatus::Failed);
        assert_eq!(reports[0].exit_code, Some(3));
    }

    #[tokio::test]
    async fn test_timeout_does_not_stop_later_candidates() {
        let harness = quick_harness().with_timeout(Duration::from_millis(100));
        let reports = harness
            .run(&[
                Candidate::new("hangs", "sleep 5"),
                Candidate::new("echo", "echo still-runs"),
            ])
            .await;

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].status, CandidateStatus::TimedOut);
        assert!(reports[0].stderr.contains("timeout"));
        assert_eq!(reports[1].status, CandidateStatus::Succeeded);
        assert_eq!(reports[1].stdout.trim(), "still-runs");
    }

    #[tokio::test]
    async fn test_fastest_picks_quickest_success() {
        let harness = quick_harness();
        let reports = harness
            .run(&[
                Candidate::new("slow", "sleep 0.3"),
                Candidate::new("quick", "sleep 0.05"),
                Candidate::new("broken", "exit 1"),
            ])
            .await;

        let winner = fastest(&reports).expect("a candidate succeeded");
        assert_eq!(winner.label, "quick");
    }

    #[test]
    fn test_fastest_ignores_failures() {
        let reports = vec![CandidateReport {
            label: "broken".to_string(),
            status: CandidateStatus::Failed,
            exit_code: Some(1),
            duration_secs: 0.1,
            stdout: String::new(),
            stderr: String::new(),
        }];

        assert!(fastest(&reports).is_none());
    }
}
