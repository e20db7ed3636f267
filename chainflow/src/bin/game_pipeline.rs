//! 4-stage game development pipeline demo.
//!
//! Architect -> Developer -> Tester -> Documenter, each stage delegating to
//! its own configured model. Runs against an offline canned backend; swap in
//! a real `CompletionBackend` implementation to talk to a live service.

use anyhow::Result;
use chainflow::prelude::*;
use chainflow::testing::CannedBackend;
use tracing_subscriber::EnvFilter;

fn build_pipeline(config: &PipelineConfig) -> Result<Pipeline, PipelineValidationError> {
    let project_request = "Create a simple Tic-Tac-Toe (X&Os) game in Python";

    PipelineBuilder::new("game-development")
        .stage(
            Stage::from_prompt(
                "architecture",
                &config.architecture_model,
                format!("Create a detailed architecture and rulebook for: {project_request}"),
            )
            .with_system_instruction(
                "You are a software architect. Create detailed technical specifications \
                 and architecture for software projects.",
            ),
        )?
        .stage(
            Stage::new(
                "development",
                &config.development_model,
                |outputs: &PriorOutputs| {
                    format!(
                        "Based on this architecture, write complete Python code:\n{}",
                        outputs.get("architecture").unwrap_or_default()
                    )
                },
            )
            .with_system_instruction(
                "You are a Python developer. Write clean, functional code based on \
                 specifications.",
            ),
        )?
        .stage(
            Stage::new("testing", &config.testing_model, |outputs: &PriorOutputs| {
                format!(
                    "Create comprehensive unit tests for this code:\n{}",
                    outputs.get("development").unwrap_or_default()
                )
            })
            .with_system_instruction(
                "You are a QA engineer. Create comprehensive tests for code to ensure \
                 it works correctly.",
            ),
        )?
        // The documentation model takes no system instruction.
        .stage(Stage::new(
            "documentation",
            &config.documentation_model,
            |outputs: &PriorOutputs| {
                format!(
                    "Act as a technical writer. Create comprehensive documentation for \
                     this Tic-Tac-Toe game. Include setup instructions, usage guide, \
                     architecture overview, testing approach, and API reference.\n\n\
                     Architecture:\n{}\n\nCode Implementation:\n{}\n\nTest Suite:\n{}",
                    outputs.get("architecture").unwrap_or_default(),
                    outputs.get("development").unwrap_or_default(),
                    outputs.get("testing").unwrap_or_default()
                )
            },
        ))?
        .build()
}

fn offline_backend(config: &PipelineConfig) -> CannedBackend {
    CannedBackend::new()
        .with_response(
            &config.architecture_model,
            "Architecture: a 3x3 board module, a turn engine alternating X and O, \
             win detection over rows, columns and diagonals, and a console renderer.",
        )
        .with_response(
            &config.development_model,
            "def new_board():\n    return [[' '] * 3 for _ in range(3)]\n\n\
             def winner(board):\n    ...",
        )
        .with_response(
            &config.testing_model,
            "class TestBoard(unittest.TestCase):\n    def test_new_board_is_empty(self):\n        ...",
        )
        .with_response(
            &config.documentation_model,
            "# Tic-Tac-Toe\n\nSetup: python tictactoe.py. Two players alternate \
             placing X and O on a 3x3 grid.",
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("4-Agent Game Development Pipeline");
    println!("=================================");

    let config = PipelineConfig::from_env();
    println!("Using region: {}", config.region);
    println!("Model Configuration:");
    println!("  Architecture:  {}", config.architecture_model);
    println!("  Development:   {}", config.development_model);
    println!("  Testing:       {}", config.testing_model);
    println!("  Documentation: {}", config.documentation_model);
    println!();

    let pipeline = build_pipeline(&config)?;
    let backend = offline_backend(&config);

    match pipeline.run(&backend).await {
        Ok(run) => {
            for result in &run.results {
                println!("=== {} ===", result.name.to_uppercase());
                println!("{}\n", result.output.as_deref().unwrap_or_default());
            }
            println!("[SUCCESS] PIPELINE COMPLETE - {} AGENTS COLLABORATED", run.stage_count());
            println!();
            println!("{}", format_summary(&run));
            Ok(())
        }
        Err(err) => {
            eprintln!("[FAILED] PIPELINE FAILED: {err}");
            eprintln!(
                "Time spent before failure: {:.2} seconds",
                err.run().total_duration_secs()
            );
            if err.run().stage_count() > 0 {
                println!("{}", format_summary(err.run()));
            }
            Err(err.into())
        }
    }
}
