//! Human-readable formatting of runs, comparisons, and catalogs.
//!
//! Pure functions from structured results to display strings. Nothing here
//! prints; callers decide where the tables go.

use crate::catalog::ModelSummary;
use crate::core::PipelineRun;
use crate::harness::{fastest, CandidateReport, CandidateStatus};

/// Formats a pipeline run as a timing table.
///
/// One row per stage result in execution order, then a total line whose
/// value is the sum of the per-stage durations.
#[must_use]
pub fn format_summary(run: &PipelineRun) -> String {
    let mut out = String::new();
    out.push_str("*** TIMING SUMMARY ***\n");
    out.push_str(&"-".repeat(50));
    out.push('\n');

    for result in &run.results {
        let marker = if result.is_success() {
            "[SUCCESS]"
        } else {
            "[FAILED] "
        };
        out.push_str(&format!(
            "{:<35}: {:>8.2} sec {}\n",
            result.name,
            result.duration_secs(),
            marker
        ));
    }

    out.push_str(&"-".repeat(50));
    out.push('\n');
    out.push_str(&format!(
        "Total Pipeline Time: {:.2} seconds\n",
        run.total_duration_secs()
    ));
    out.push_str(&"=".repeat(50));
    out.push('\n');
    out
}

/// Formats benchmark reports as a ranked comparison table.
///
/// The fastest succeeding candidate is marked explicitly; every other
/// succeeding candidate is reported as a slowdown factor relative to it.
#[must_use]
pub fn format_comparison(reports: &[CandidateReport]) -> String {
    let mut out = String::new();
    out.push_str("*** PERFORMANCE COMPARISON SUMMARY ***\n");
    out.push_str(&format!(
        "{:<20} {:<10} {:<15} {}\n",
        "Candidate", "Status", "Total Time", "Performance"
    ));
    out.push_str(&"-".repeat(60));
    out.push('\n');

    let fastest_time = fastest(reports).map(|r| r.duration_secs);

    for report in reports {
        let status = match report.status {
            CandidateStatus::Succeeded => "[SUCCESS]",
            CandidateStatus::Failed => "[FAILED] ",
            CandidateStatus::TimedOut => "[TIMEOUT]",
        };
        let time = format!("{:.2}s", report.duration_secs);
        let performance = match (report.is_success(), fastest_time) {
            (true, Some(best)) if report.duration_secs <= best => {
                "*** FASTEST ***".to_string()
            }
            (true, Some(best)) => format!("{:.1}x slower", report.duration_secs / best),
            _ => "FAILED".to_string(),
        };
        out.push_str(&format!(
            "{:<20} {:<10} {:<15} {}\n",
            report.label, status, time, performance
        ));
    }

    out.push_str(&"-".repeat(60));
    out.push('\n');
    out
}

/// Formats a model catalog listing the way the listing demo prints it.
#[must_use]
pub fn format_model_catalog(models: &[ModelSummary]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Found {} models:\n\n", models.len()));
    for model in models {
        out.push_str(&format!("Model ID: {}\n", model.id));
        out.push_str(&format!("Model Name: {}\n", model.display_name));
        out.push_str(&format!("Provider: {}\n", model.provider));
        out.push_str(&"-".repeat(40));
        out.push('\n');
    }
    out
}
