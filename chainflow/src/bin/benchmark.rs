//! Benchmark comparison demo: times candidate commands and ranks them.
//!
//! Candidates come from the command line as `label=command` pairs; with no
//! arguments, the two pipeline demo binaries are compared.

use anyhow::{bail, Result};
use chainflow::prelude::*;
use chainflow::harness::fastest;
use chrono::Local;
use tracing_subscriber::EnvFilter;

fn parse_candidates(args: &[String]) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::with_capacity(args.len());
    for arg in args {
        match arg.split_once('=') {
            Some((label, command)) if !label.is_empty() && !command.is_empty() => {
                candidates.push(Candidate::new(label, command));
            }
            _ => bail!("expected label=command, got '{arg}'"),
        }
    }
    Ok(candidates)
}

fn default_candidates() -> Vec<Candidate> {
    vec![
        Candidate::new("game pipeline", "target/release/game_pipeline"),
        Candidate::new("content chain", "target/release/content_chain"),
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let candidates = if args.is_empty() {
        default_candidates()
    } else {
        parse_candidates(&args)?
    };

    println!("Staged Pipeline - Performance Comparison");
    println!("{}", "=".repeat(60));
    println!("Started at: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));

    let harness = BenchmarkHarness::new();
    let reports = harness.run(&candidates).await;

    println!();
    println!("{}", format_comparison(&reports));
    println!("Completed at: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!(
        "Total benchmark time: {:.2} seconds",
        reports.iter().map(|r| r.duration_secs).sum::<f64>()
    );

    let successes: Vec<&CandidateReport> = reports.iter().filter(|r| r.is_success()).collect();
    if successes.len() > 1 {
        println!("\n*** PERFORMANCE INSIGHTS ***");
        if let Some(winner) = fastest(&reports) {
            println!("* Fastest: {} ({:.2}s)", winner.label, winner.duration_secs);
            if let Some(slowest) = successes
                .iter()
                .max_by(|a, b| {
                    a.duration_secs
                        .partial_cmp(&b.duration_secs)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
            {
                println!(
                    "* Slowest: {} ({:.2}s)",
                    slowest.label, slowest.duration_secs
                );
                println!(
                    "* Speed difference: {:.1}x",
                    slowest.duration_secs / winner.duration_secs
                );
            }
        }
    }

    Ok(())
}
