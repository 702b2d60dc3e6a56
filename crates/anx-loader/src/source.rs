use async_trait::async_trait;
use anx_types::Dataset;
use tokio::sync::RwLock;

use crate::error::Result;

/// Something that can produce the line and flow records of a bot
#[async_trait]
pub trait LineSource: Send + Sync {
    /// Fetch both record lists. Empty `defines`/`answer` values are already `None`.
    async fn fetch(&self) -> Result<Dataset>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// In-memory source, replaceable at runtime
#[derive(Debug, Default)]
pub struct StaticSource {
    dataset: RwLock<Dataset>,
}

impl StaticSource {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: RwLock::new(dataset),
        }
    }

    /// Replace the dataset returned by the next fetch
    pub async fn set(&self, dataset: Dataset) {
        *self.dataset.write().await = dataset;
    }
}

#[async_trait]
impl LineSource for StaticSource {
    async fn fetch(&self) -> Result<Dataset> {
        Ok(self.dataset.read().await.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}
