//! Configured models with their embedding spaces loaded.

use std::sync::Arc;

use rayon::prelude::*;
use serde::Deserialize;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::config::ModelSpec;
use crate::error::Result;
use crate::space::EmbeddingSpace;

#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub spec: ModelSpec,
    pub space: Arc<EmbeddingSpace>,
}

/// What clients see of a model: everything except the vectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelSummary {
    pub id: u32,
    pub name: String,
    pub item_name: String,
    pub description: String,
    pub instructions: String,
}

impl From<&ModelSpec> for ModelSummary {
    fn from(spec: &ModelSpec) -> Self {
        Self {
            id: spec.id,
            name: spec.name.clone(),
            item_name: spec.item_name.clone(),
            description: spec.description.clone(),
            instructions: spec.instructions.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: Vec<LoadedModel>,
}

impl ModelCatalog {
    /// Load every configured model. Files are read in parallel; the first
    /// failure aborts.
    pub fn load(config: &Config) -> Result<Self> {
        let models = config
            .models
            .par_iter()
            .map(|spec| {
                let space = EmbeddingSpace::load(config.model_file(spec))?;
                Ok(LoadedModel {
                    spec: spec.clone(),
                    space: Arc::new(space),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        info!(count = models.len(), "model catalog ready");
        Ok(Self { models })
    }

    pub fn from_models(models: Vec<LoadedModel>) -> Self {
        Self { models }
    }

    pub fn get(&self, id: u32) -> Option<&LoadedModel> {
        self.models.iter().find(|m| m.spec.id == id)
    }

    pub fn summaries(&self) -> Vec<ModelSummary> {
        self.models.iter().map(|m| ModelSummary::from(&m.spec)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LoadedModel> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
