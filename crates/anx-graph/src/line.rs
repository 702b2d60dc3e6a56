use anx_types::LineRecord;

use crate::template::Template;

/// Outgoing edges of a line, keyed by answer label in insertion order.
///
/// The `None` key is the default edge. Inserting an existing key replaces its
/// target and keeps the key's original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowMap {
    entries: Vec<(Option<String>, String)>,
}

impl FlowMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an edge, returning the target it replaced
    pub fn insert(&mut self, answer: Option<String>, target: String) -> Option<String> {
        match self.entries.iter_mut().find(|(key, _)| *key == answer) {
            Some((_, existing)) => Some(std::mem::replace(existing, target)),
            None => {
                self.entries.push((answer, target));
                None
            }
        }
    }

    pub fn get(&self, answer: Option<&str>) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.as_deref() == answer)
            .map(|(_, target)| target.as_str())
    }

    pub fn default_target(&self) -> Option<&str> {
        self.get(None)
    }

    /// Labeled answers in insertion order, skipping the default edge
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|(key, _)| key.as_deref())
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, target)| target.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A validated bot line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub name: String,
    pub bot_text: String,
    pub defines: Option<String>,
    pub flow: FlowMap,
    pub template: Template,
}

impl Line {
    pub fn valid_answers(&self) -> Vec<&str> {
        self.flow.labels().collect()
    }

    /// Placeholder names the bot text needs before it can be shown
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.template.placeholders()
    }
}

impl From<LineRecord> for Line {
    fn from(record: LineRecord) -> Self {
        Self {
            template: Template::parse(&record.bot_text),
            name: record.name,
            bot_text: record.bot_text,
            defines: record.defines,
            flow: FlowMap::new(),
        }
    }
}
