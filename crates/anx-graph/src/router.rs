use crate::line::Line;

/// Where an answer on a line leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextLine<'a> {
    /// Follow an edge to the named line
    Goto(&'a str),
    /// No edge matches and there is no default; the line has labeled answers
    InvalidAnswer,
    /// The line has no outgoing edges at all
    DeadEnd,
}

/// Resolve an answer against a line's edges: exact label first, then the default edge
pub fn route<'a>(line: &'a Line, answer: Option<&str>) -> NextLine<'a> {
    if let Some(target) = line.flow.get(answer) {
        return NextLine::Goto(target);
    }
    if let Some(target) = line.flow.default_target() {
        return NextLine::Goto(target);
    }
    if line.flow.is_empty() {
        NextLine::DeadEnd
    } else {
        NextLine::InvalidAnswer
    }
}
