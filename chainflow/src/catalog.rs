//! Model catalog collaborator and an in-memory implementation.

use crate::errors::CatalogError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One entry in a model catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Opaque model identifier.
    pub id: String,
    /// Human-readable model name.
    pub display_name: String,
    /// Name of the organisation providing the model.
    pub provider: String,
}

impl ModelSummary {
    /// Creates a new model summary.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            provider: provider.into(),
        }
    }
}

/// Trait for catalog collaborators that list the models a region offers.
#[async_trait]
pub trait ModelCatalog: Send + Sync {
    /// Lists the models available in the given region.
    async fn list_models(&self, region: &str) -> Result<Vec<ModelSummary>, CatalogError>;
}

/// An in-memory catalog keyed by region.
///
/// Serves as the demo and test stand-in for a cloud catalog; a real catalog
/// client plugs in behind the same trait.
#[derive(Debug, Clone, Default)]
pub struct StaticModelCatalog {
    regions: HashMap<String, Vec<ModelSummary>>,
}

impl StaticModelCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a region with its model list.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>, models: Vec<ModelSummary>) -> Self {
        self.regions.insert(region.into(), models);
        self
    }
}

#[async_trait]
impl ModelCatalog for StaticModelCatalog {
    async fn list_models(&self, region: &str) -> Result<Vec<ModelSummary>, CatalogError> {
        self.regions
            .get(region)
            .cloned()
            .ok_or_else(|| CatalogError::RegionUnavailable {
                region: region.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> StaticModelCatalog {
        StaticModelCatalog::new().with_region(
            "us-east-1",
            vec![
                ModelSummary::new("model-a", "Model A", "Acme"),
                ModelSummary::new("model-b", "Model B", "Acme"),
            ],
        )
    }

    #[tokio::test]
    async fn test_known_region() {
        let models = catalog().list_models("us-east-1").await.expect("listing");

        assert_eq!(models.len(), 2);
        assert_eq!(models[0].id, "model-a");
        assert_eq!(models[1].display_name, "Model B");
    }

    #[tokio::test]
    async fn test_unknown_region() {
        let err = catalog()
            .list_models("mars-north-1")
            .await
            .expect_err("unavailable");

        assert!(matches!(
            err,
            CatalogError::RegionUnavailable { ref region } if region == "mars-north-1"
        ));
    }
}
