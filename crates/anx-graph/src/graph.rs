use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::line::Line;

/// Entry point of every conversation
pub const START: &str = "start";
/// Terminal line; stepping past it restarts the session
pub const END: &str = "end";

/// An immutable, validated set of lines.
///
/// Graphs are only produced by [`crate::GraphBuilder`] (or [`Graph::empty`]) and
/// are shared behind an `Arc`; a reload publishes a whole new graph.
#[derive(Debug, Clone)]
pub struct Graph {
    lines: HashMap<String, Line>,
    generation: u64,
    loaded_at: DateTime<Utc>,
}

impl Graph {
    pub(crate) fn new(lines: HashMap<String, Line>) -> Self {
        Self {
            lines,
            generation: 0,
            loaded_at: Utc::now(),
        }
    }

    /// A graph without lines, served until the first successful reload
    pub fn empty() -> Self {
        Self::new(HashMap::new())
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn line(&self, name: &str) -> Option<&Line> {
        self.lines.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lines.contains_key(name)
    }

    pub fn start(&self) -> Option<&Line> {
        self.line(START)
    }

    pub fn end(&self) -> Option<&Line> {
        self.line(END)
    }

    /// Line names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.lines.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sequence number of the reload that published this graph (0 = never loaded)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::empty()
    }
}
