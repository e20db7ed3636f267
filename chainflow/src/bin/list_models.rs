//! Model listing demo: one read-only catalog call, printed as a listing.

use anyhow::Result;
use chainflow::prelude::*;
use tracing_subscriber::EnvFilter;

fn sample_catalog() -> StaticModelCatalog {
    StaticModelCatalog::new().with_region(
        "us-east-1",
        vec![
            ModelSummary::new(
                "anthropic.claude-3-sonnet-20240229-v1:0",
                "Claude 3 Sonnet",
                "Anthropic",
            ),
            ModelSummary::new(
                "anthropic.claude-3-haiku-20240307-v1:0",
                "Claude 3 Haiku",
                "Anthropic",
            ),
            ModelSummary::new("amazon.nova-lite-v1:0", "Nova Lite", "Amazon"),
            ModelSummary::new("amazon.titan-text-express-v1", "Titan Text G1 - Express", "Amazon"),
        ],
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = PipelineConfig::from_env();
    println!("Using region: {}", config.region);

    let catalog = sample_catalog();
    match catalog.list_models(&config.region).await {
        Ok(models) => {
            println!("{}", format_model_catalog(&models));
            Ok(())
        }
        Err(CatalogError::Authentication(reason)) => {
            eprintln!("Error: authentication failed: {reason}");
            eprintln!("Configure credentials for the catalog service and retry.");
            std::process::exit(1);
        }
        Err(err @ CatalogError::RegionUnavailable { .. }) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
