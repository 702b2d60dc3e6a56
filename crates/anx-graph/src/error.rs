use thiserror::Error;

/// Reasons a line/flow dataset is rejected by the validator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidFlow {
    #[error("did not find required target line: {target} (from {from} on {})", display_answer(.answer))]
    MissingTarget {
        from: String,
        answer: Option<String>,
        target: String,
    },

    #[error("did not find required source line: {from} (to {target} on {})", display_answer(.answer))]
    MissingSource {
        from: String,
        answer: Option<String>,
        target: String,
    },

    #[error("did not find required line(s): {}", .0.join(", "))]
    MissingRequiredLines(Vec<String>),

    #[error("orphan lines found: {}", .0.join(", "))]
    OrphanLines(Vec<String>),
}

fn display_answer(answer: &Option<String>) -> &str {
    answer.as_deref().unwrap_or("<default>")
}

/// Defects surfaced by stepping. Ordinary conversational problems are returned as text instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    #[error("graph has no '{0}' line")]
    MissingLine(String),
}

pub type Result<T> = std::result::Result<T, InvalidFlow>;
