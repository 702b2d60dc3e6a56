use serde::{Deserialize, Serialize};

/// A raw bot line as delivered by a loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRecord {
    pub name: String,
    pub bot_text: String,
    /// Variable that stores the answer given while this line is current
    #[serde(default)]
    pub defines: Option<String>,
}

impl LineRecord {
    pub fn new(name: impl Into<String>, bot_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bot_text: bot_text.into(),
            defines: None,
        }
    }

    pub fn with_defines(mut self, variable: impl Into<String>) -> Self {
        self.defines = Some(variable.into());
        self
    }
}

/// A raw edge between two lines. `answer: None` marks the default edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub source: String,
    #[serde(default)]
    pub answer: Option<String>,
    pub target: String,
}

impl FlowRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            answer: None,
            target: target.into(),
        }
    }

    pub fn on_answer(
        source: impl Into<String>,
        answer: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            answer: Some(answer.into()),
            target: target.into(),
        }
    }
}

/// Both record lists of one load, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub lines: Vec<LineRecord>,
    pub flows: Vec<FlowRecord>,
}

impl Dataset {
    pub fn new(lines: Vec<LineRecord>, flows: Vec<FlowRecord>) -> Self {
        Self { lines, flows }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.flows.is_empty()
    }
}
