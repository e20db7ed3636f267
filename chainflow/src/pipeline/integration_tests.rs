//! End-to-end runner behavior over in-memory backends.

use super::{Pipeline, PipelineBuilder};
use crate::cancellation::CancellationToken;
use crate::core::{PriorOutputs, StageStatus};
use crate::errors::{DelegationError, PipelineError, PipelineValidationError};
use crate::stage::Stage;
use crate::testing::ScriptedBackend;
use pretty_assertions::assert_eq;

fn content_chain() -> Result<Pipeline, PipelineValidationError> {
    PipelineBuilder::new("content")
        .stage(Stage::from_prompt("generate", "model-a", "Write a tagline"))?
        .stage(Stage::new("review", "model-b", |outputs: &PriorOutputs| {
            format!("review: {}", outputs.get("generate").unwrap_or_default())
        }))?
        .build()
}

fn four_stage_chain() -> Result<Pipeline, PipelineValidationError> {
    PipelineBuilder::new("game-development")
        .stage(
            Stage::from_prompt("architecture", "model-a", "Design the game")
                .with_system_instruction("You are a software architect."),
        )?
        .stage(Stage::new(
            "development",
            "model-b",
            |outputs: &PriorOutputs| {
                format!(
                    "Write code for:\n{}",
                    outputs.get("architecture").unwrap_or_default()
                )
            },
        ))?
        .stage(Stage::new("testing", "model-c", |outputs: &PriorOutputs| {
            format!(
                "Write tests for:\n{}",
                outputs.get("development").unwrap_or_default()
            )
        }))?
        .stage(Stage::new(
            "documentation",
            "model-d",
            |outputs: &PriorOutputs| {
                format!(
                    "Document:\n{}\n{}",
                    outputs.get("architecture").unwrap_or_default(),
                    outputs.get("development").unwrap_or_default()
                )
            },
        ))?
        .build()
}

#[tokio::test]
async fn all_stages_succeed_in_declared_order() {
    let backend = ScriptedBackend::new();
    backend.push_response("the architecture");
    backend.push_response("the code");
    backend.push_response("the tests");
    backend.push_response("the docs");

    let pipeline = four_stage_chain().expect("valid pipeline");
    let run = pipeline.run(&backend).await.expect("all stages succeed");

    assert_eq!(run.stage_count(), 4);
    assert!(run.succeeded());
    let names: Vec<&str> = run.results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["architecture", "development", "testing", "documentation"]
    );
    assert!(run
        .results
        .iter()
        .all(|r| r.status == StageStatus::Completed));
    assert_eq!(run.output_of("documentation"), Some("the docs"));
}

#[tokio::test]
async fn later_stage_prompt_embeds_earlier_output_verbatim() {
    let backend = ScriptedBackend::new();
    backend.push_response("draft text");
    backend.push_response("polished text");

    let pipeline = content_chain().expect("valid pipeline");
    pipeline.run(&backend).await.expect("both stages succeed");

    let requests = backend.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].prompt, "Write a tagline");
    assert_eq!(requests[1].prompt, "review: draft text");
    assert_eq!(requests[1].model, "model-b");
}

#[tokio::test]
async fn system_instruction_reaches_the_backend() {
    let backend = ScriptedBackend::new();
    backend.push_response("the architecture");
    backend.push_response("the code");
    backend.push_response("the tests");
    backend.push_response("the docs");

    let pipeline = four_stage_chain().expect("valid pipeline");
    pipeline.run(&backend).await.expect("all stages succeed");

    let requests = backend.requests();
    assert_eq!(
        requests[0].system.as_deref(),
        Some("You are a software architect.")
    );
    assert_eq!(requests[1].system, None);
}

#[tokio::test]
async fn failure_at_stage_three_stops_before_stage_four() {
    let backend = ScriptedBackend::new();
    backend.push_response("the architecture");
    backend.push_response("the code");
    backend.push_failure(DelegationError::QuotaExceeded(
        "request rate too high".to_string(),
    ));

    let pipeline = four_stage_chain().expect("valid pipeline");
    let err = pipeline.run(&backend).await.expect_err("stage 3 fails");

    match &err {
        PipelineError::StageFailed { stage, run, source } => {
            assert_eq!(stage, "testing");
            assert!(matches!(source, DelegationError::QuotaExceeded(_)));
            assert_eq!(run.stage_count(), 3);
            let succeeded: Vec<&str> = run
                .results
                .iter()
                .filter(|r| r.is_success())
                .map(|r| r.name.as_str())
                .collect();
            assert_eq!(succeeded, vec!["architecture", "development"]);
            assert!(run.results[2].is_failure());
        }
        PipelineError::Cancelled { .. } => panic!("expected stage failure"),
    }

    // Stage 4 was never invoked.
    assert_eq!(backend.call_count(), 3);
}

#[tokio::test]
async fn first_stage_failure_yields_empty_success_set() {
    let backend = ScriptedBackend::new();
    backend.push_failure(DelegationError::Authentication("no credentials".to_string()));

    let pipeline = content_chain().expect("valid pipeline");
    let err = pipeline.run(&backend).await.expect_err("stage 1 fails");

    let run = err.run();
    assert_eq!(run.stage_count(), 1);
    assert!(run.results[0].is_failure());
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn cancellation_before_first_stage_runs_nothing() {
    let backend = ScriptedBackend::new();
    backend.push_response("unused");

    let token = CancellationToken::new();
    token.cancel("shutdown requested");

    let pipeline = content_chain().expect("valid pipeline");
    let err = pipeline
        .run_with_cancellation(&backend, &token)
        .await
        .expect_err("cancelled");

    match err {
        PipelineError::Cancelled { stage, run, reason } => {
            assert_eq!(stage, "generate");
            assert_eq!(run.stage_count(), 0);
            assert_eq!(reason, "shutdown requested");
        }
        PipelineError::StageFailed { .. } => panic!("expected cancellation"),
    }
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn failed_stage_error_text_matches_backend_error() {
    let backend = ScriptedBackend::new();
    backend.push_failure(DelegationError::Timeout("deadline of 30s".to_string()));

    let pipeline = content_chain().expect("valid pipeline");
    let err = pipeline.run(&backend).await.expect_err("stage 1 fails");

    let run = err.into_run();
    assert_eq!(
        run.results[0].error.as_deref(),
        Some("request timed out: deadline of 30s")
    );
}
