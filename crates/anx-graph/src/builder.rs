use std::collections::{BTreeSet, HashMap, HashSet};

use anx_types::{Dataset, FlowRecord, LineRecord};

use crate::error::{InvalidFlow, Result};
use crate::graph::{Graph, END, START};
use crate::line::Line;

/// Validate raw records into a [`Graph`]
pub fn build(lines: Vec<LineRecord>, flows: Vec<FlowRecord>) -> Result<Graph> {
    GraphBuilder::new().lines(lines).flows(flows).build()
}

/// Collects line and flow records, then validates them into a [`Graph`]
#[derive(Debug, Default)]
pub struct GraphBuilder {
    lines: Vec<LineRecord>,
    flows: Vec<FlowRecord>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, line: LineRecord) -> Self {
        self.lines.push(line);
        self
    }

    pub fn lines(mut self, lines: impl IntoIterator<Item = LineRecord>) -> Self {
        self.lines.extend(lines);
        self
    }

    pub fn flow(mut self, flow: FlowRecord) -> Self {
        self.flows.push(flow);
        self
    }

    pub fn flows(mut self, flows: impl IntoIterator<Item = FlowRecord>) -> Self {
        self.flows.extend(flows);
        self
    }

    pub fn dataset(self, dataset: Dataset) -> Self {
        self.lines(dataset.lines).flows(dataset.flows)
    }

    /// Build the graph, rejecting inconsistent data.
    ///
    /// Checks run in this order: every flow's target and source exist, `start`
    /// and `end` exist, and every line except `start` is the target of some flow.
    pub fn build(self) -> Result<Graph> {
        let mut lines: HashMap<String, Line> = HashMap::with_capacity(self.lines.len());
        for record in self.lines {
            if lines.contains_key(&record.name) {
                tracing::warn!(line = %record.name, "duplicate line name, keeping the last definition");
            }
            lines.insert(record.name.clone(), Line::from(record));
        }

        for flow in self.flows {
            if !lines.contains_key(&flow.target) {
                return Err(InvalidFlow::MissingTarget {
                    from: flow.source,
                    answer: flow.answer,
                    target: flow.target,
                });
            }
            let Some(source) = lines.get_mut(&flow.source) else {
                return Err(InvalidFlow::MissingSource {
                    from: flow.source,
                    answer: flow.answer,
                    target: flow.target,
                });
            };
            if let Some(previous) = source.flow.insert(flow.answer.clone(), flow.target.clone()) {
                tracing::warn!(
                    source = %flow.source,
                    answer = ?flow.answer,
                    previous = %previous,
                    target = %flow.target,
                    "duplicate flow, the later edge wins"
                );
            }
        }

        let children: HashSet<&str> = lines
            .values()
            .flat_map(|line| line.flow.targets())
            .collect();

        let missing: Vec<String> = [START, END]
            .into_iter()
            .filter(|name| !lines.contains_key(*name))
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(InvalidFlow::MissingRequiredLines(missing));
        }

        let orphans: BTreeSet<&str> = lines
            .keys()
            .map(String::as_str)
            .filter(|name| *name != START && !children.contains(name))
            .collect();
        if !orphans.is_empty() {
            return Err(InvalidFlow::OrphanLines(
                orphans.into_iter().map(str::to_string).collect(),
            ));
        }

        tracing::debug!(lines = lines.len(), "flow graph validated");
        Ok(Graph::new(lines))
    }
}
