//! Benchmarks for sequential pipeline execution.

use chainflow::prelude::*;
use chainflow::testing::CannedBackend;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn four_stage_pipeline() -> Pipeline {
    let result = PipelineBuilder::new("bench")
        .stage(Stage::from_prompt("architecture", "model-a", "design"))
        .and_then(|b| {
            b.stage(Stage::new("development", "model-b", |outputs: &PriorOutputs| {
                format!("code: {}", outputs.get("architecture").unwrap_or_default())
            }))
        })
        .and_then(|b| {
            b.stage(Stage::new("testing", "model-c", |outputs: &PriorOutputs| {
                format!("tests: {}", outputs.get("development").unwrap_or_default())
            }))
        })
        .and_then(|b| {
            b.stage(Stage::new("documentation", "model-d", |outputs: &PriorOutputs| {
                format!("docs: {}", outputs.get("testing").unwrap_or_default())
            }))
        })
        .and_then(PipelineBuilder::build);
    match result {
        Ok(pipeline) => pipeline,
        Err(err) => panic!("bench pipeline is valid: {err}"),
    }
}

fn runner_benchmark(c: &mut Criterion) {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(err) => panic!("runtime: {err}"),
    };
    let pipeline = four_stage_pipeline();
    let backend = CannedBackend::new()
        .with_response("model-a", "the architecture")
        .with_response("model-b", "the code")
        .with_response("model-c", "the tests")
        .with_response("model-d", "the docs");

    c.bench_function("four_stage_chain", |b| {
        b.iter(|| {
            rt.block_on(async {
                let run = pipeline.run(&backend).await;
                black_box(run.map(|r| r.stage_count()))
            })
        });
    });
}

criterion_group!(benches, runner_benchmark);
criterion_main!(benches);
