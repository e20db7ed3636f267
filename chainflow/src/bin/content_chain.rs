//! 2-stage content chain demo: generate with one model, review with another.

use anyhow::Result;
use chainflow::prelude::*;
use chainflow::testing::CannedBackend;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = PipelineConfig::from_env();
    println!("Using region: {}", config.region);

    let user_input = "Write a short marketing message for a new AI-powered productivity app";
    println!("Input: {user_input}\n");

    let pipeline = PipelineBuilder::new("content-chain")
        .stage(
            Stage::from_prompt("generate", &config.development_model, user_input)
                .with_system_instruction(
                    "You are a content creator. Generate creative content based on user input.",
                ),
        )?
        // The review model takes no system instruction; the editor role is in the prompt.
        .stage(Stage::new(
            "review",
            &config.documentation_model,
            |outputs: &PriorOutputs| {
                format!(
                    "Act as an editor. Review and improve this content to make it more \
                     concise and professional: {}",
                    outputs.get("generate").unwrap_or_default()
                )
            },
        ))?
        .build()?;

    let backend = CannedBackend::new()
        .with_response(
            &config.development_model,
            "Transform your workflow with our revolutionary AI productivity app! Boost \
             efficiency by 300% with intelligent automation, smart scheduling, and \
             seamless integration across all your favorite tools.",
        )
        .with_response(
            &config.documentation_model,
            "Boost productivity 3x with our AI app. Smart automation, scheduling & tool \
             integration in one platform.",
        );

    let run = pipeline.run(&backend).await?;

    println!(
        "Generated: {}\n",
        run.output_of("generate").unwrap_or_default()
    );
    println!("Final: {}\n", run.output_of("review").unwrap_or_default());
    println!("{}", format_summary(&run));

    Ok(())
}
