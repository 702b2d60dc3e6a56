use std::collections::HashMap;
use std::sync::Arc;

use anx_types::{Dataset, FlowRecord, LineRecord};
use tokio::sync::RwLock;

use crate::builder::build;
use crate::error::{InvalidFlow, StepError};
use crate::graph::Graph;
use crate::registry::SessionRegistry;
use crate::session::Step;

/// Holds the current flow graph and every live session.
///
/// Steps read an `Arc` snapshot of the graph, so they see either the graph
/// before a reload or the one after it, never a mix. A reload validates the new
/// records completely before swapping, then resets all sessions.
#[derive(Debug)]
pub struct Engine {
    graph: RwLock<Arc<Graph>>,
    sessions: SessionRegistry,
}

impl Engine {
    /// Engine serving an empty graph until the first reload
    pub fn new() -> Self {
        Self {
            graph: RwLock::new(Arc::new(Graph::empty())),
            sessions: SessionRegistry::new(),
        }
    }

    /// Snapshot of the graph currently served
    pub async fn graph(&self) -> Arc<Graph> {
        Arc::clone(&*self.graph.read().await)
    }

    /// Validate `lines` and `flows`, publish them as the current graph and reset
    /// every session. On error the current graph keeps serving.
    ///
    /// The reset runs after the graph write lock is released, since `advance`
    /// locks a session before reading the graph. A step landing between the swap
    /// and the reset walks its old cursor name through the new graph (or restarts
    /// if the name is gone) and is then reset like every other session.
    pub async fn reload(
        &self,
        lines: Vec<LineRecord>,
        flows: Vec<FlowRecord>,
    ) -> Result<Arc<Graph>, InvalidFlow> {
        let graph = build(lines, flows).map_err(|e| {
            tracing::warn!(error = %e, "rejected flow graph, keeping the current one");
            e
        })?;

        let graph = {
            let mut current = self.graph.write().await;
            let next = Arc::new(graph.with_generation(current.generation() + 1));
            *current = Arc::clone(&next);
            next
        };

        let reset = self.sessions.reset_all().await;
        tracing::info!(
            generation = graph.generation(),
            lines = graph.len(),
            sessions_reset = reset,
            "flow graph reloaded"
        );

        Ok(graph)
    }

    pub async fn reload_dataset(&self, dataset: Dataset) -> Result<Arc<Graph>, InvalidFlow> {
        self.reload(dataset.lines, dataset.flows).await
    }

    /// Advance the session `session_id` by one answer and return the bot text
    pub async fn step(&self, session_id: &str, answer: Option<&str>) -> Result<String, StepError> {
        self.advance(session_id, answer).await.map(|step| step.text)
    }

    /// Like [`Engine::step`], also reporting what happened to the cursor
    pub async fn advance(&self, session_id: &str, answer: Option<&str>) -> Result<Step, StepError> {
        let session = self.sessions.get_or_create(session_id).await;
        let mut session = session.lock().await;
        let graph = self.graph().await;

        let step = session.step(&graph, answer).map_err(|e| {
            tracing::error!(session_id = %session_id, generation = graph.generation(), error = %e, "step failed");
            e
        })?;

        tracing::debug!(
            session_id = %session_id,
            kind = ?step.kind,
            line = ?session.current_line(),
            "session stepped"
        );
        Ok(step)
    }

    /// Line the session is on, `None` if unset or unknown
    pub async fn current_line(&self, session_id: &str) -> Option<String> {
        let session = self.sessions.get(session_id).await?;
        let session = session.lock().await;
        session.current_line().map(str::to_string)
    }

    pub async fn placeholders(&self, session_id: &str) -> Option<HashMap<String, String>> {
        let session = self.sessions.get(session_id).await?;
        let session = session.lock().await;
        Some(session.placeholders().clone())
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.len().await
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Drop all sessions and go back to the empty graph
    pub async fn clear(&self) {
        *self.graph.write().await = Arc::new(Graph::empty());
        self.sessions.clear().await;
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
