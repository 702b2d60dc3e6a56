use std::sync::Arc;

use anx_graph::Engine;
use anx_loader::LineSource;

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// The engine owns the current flow graph and every session; the source is
/// where `/update` fetches new lines and flows from.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<Engine>,
    pub source: Arc<dyn LineSource>,
}

impl AppState {
    pub fn new(config: Config, engine: Engine, source: Arc<dyn LineSource>) -> Self {
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
            source,
        }
    }

    /// Fetch the dataset from the source and swap it into the engine
    pub async fn reload(&self) -> crate::error::ApiResult<Arc<anx_graph::Graph>> {
        let dataset = self.source.fetch().await?;
        let graph = self.engine.reload_dataset(dataset).await?;
        Ok(graph)
    }
}
