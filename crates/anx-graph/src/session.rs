use std::collections::HashMap;

use crate::error::StepError;
use crate::graph::{Graph, END};
use crate::line::Line;
use crate::router::{route, NextLine};
use crate::template::Rendered;

/// Conversation identity supplied by the transport layer
pub type SessionId = String;

pub const NO_START_TEXT: &str = "No start line found - try to update the bot lines and flows";
pub const RESTART_TEXT: &str = "You have reached the end of the session - restarting!";
pub const VALID_ANSWERS_PREFIX: &str = "valid answers are: ";

/// What a single step did to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Entered `start` from an unset cursor
    Started,
    /// The graph has no `start` line; the cursor stays unset
    NoStart,
    /// Followed an edge
    Advanced,
    /// The answer matched nothing; the cursor did not move
    InvalidAnswer,
    /// The line had no edges and the session was routed to `end`
    DeadEnd,
    /// Answered the `end` line; the cursor is unset again
    Restarted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub text: String,
    pub kind: StepKind,
}

impl Step {
    fn new(text: impl Into<String>, kind: StepKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

/// One conversation's cursor and the answers it collected.
///
/// The cursor holds a line *name*, so it stays meaningful across graph reloads.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current_line: Option<String>,
    placeholders: HashMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_line(&self) -> Option<&str> {
        self.current_line.as_deref()
    }

    pub fn placeholders(&self) -> &HashMap<String, String> {
        &self.placeholders
    }

    pub fn placeholder(&self, name: &str) -> Option<&str> {
        self.placeholders.get(name).map(String::as_str)
    }

    /// Unset the cursor. Recorded placeholders are kept.
    pub fn reset(&mut self) {
        self.current_line = None;
    }

    /// Advance the conversation by one answer against `graph`.
    ///
    /// Unknown answers, undefined placeholders and dead ends are reported in
    /// the returned text. An `Err` means the graph itself is broken.
    pub fn step(&mut self, graph: &Graph, answer: Option<&str>) -> Result<Step, StepError> {
        let stale = self
            .current_line
            .as_deref()
            .filter(|name| !graph.contains(name))
            .map(str::to_string);
        if let Some(name) = stale {
            tracing::warn!(line = %name, "session points at a line missing from the current graph, restarting");
            self.current_line = None;
        }

        let Some(line) = self.current_line.as_deref().and_then(|name| graph.line(name)) else {
            return Ok(self.enter_start(graph));
        };

        self.record(line, answer);

        if line.name == END {
            self.current_line = None;
            return Ok(Step::new(RESTART_TEXT, StepKind::Restarted));
        }

        let (target, kind) = match route(line, answer) {
            NextLine::Goto(target) => (target, StepKind::Advanced),
            NextLine::InvalidAnswer => {
                let text = format!("{}{}", VALID_ANSWERS_PREFIX, line.valid_answers().join(", "));
                return Ok(Step::new(text, StepKind::InvalidAnswer));
            }
            NextLine::DeadEnd => {
                tracing::warn!(line = %line.name, "reached a line with no flow, moving to end");
                (END, StepKind::DeadEnd)
            }
        };

        let next = graph
            .line(target)
            .ok_or_else(|| StepError::MissingLine(target.to_string()))?;
        self.current_line = Some(next.name.clone());

        Ok(Step::new(self.render(next), kind))
    }

    fn enter_start(&mut self, graph: &Graph) -> Step {
        match graph.start() {
            Some(start) => {
                self.current_line = Some(start.name.clone());
                Step::new(self.render(start), StepKind::Started)
            }
            None => Step::new(NO_START_TEXT, StepKind::NoStart),
        }
    }

    fn record(&mut self, line: &Line, answer: Option<&str>) {
        if let Some(variable) = &line.defines {
            self.placeholders
                .insert(variable.clone(), answer.unwrap_or_default().to_string());
        }
    }

    fn render(&self, line: &Line) -> String {
        match line.template.render(&self.placeholders) {
            Rendered::Text(text) => text,
            Rendered::Missing { name } => {
                format!("undefined placeholder '{}' on line '{}'", name, line.name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use anx_types::{FlowRecord, LineRecord};

    fn greeting_graph() -> Graph {
        GraphBuilder::new()
            .line(LineRecord::new("start", "Hi"))
            .line(LineRecord::new("mid", "Hello {name}").with_defines("name"))
            .line(LineRecord::new("end", "Bye"))
            .flow(FlowRecord::new("start", "mid"))
            .flow(FlowRecord::new("mid", "end"))
            .build()
            .unwrap()
    }

    fn question_graph() -> Graph {
        GraphBuilder::new()
            .line(LineRecord::new("start", "Ready?"))
            .line(LineRecord::new("end", "Bye"))
            .flow(FlowRecord::on_answer("start", "yes", "end"))
            .flow(FlowRecord::on_answer("start", "no", "start"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_answer_is_stored_under_the_answered_line() {
        let graph = greeting_graph();
        let mut session = Session::new();

        let step = session.step(&graph, None).unwrap();
        assert_eq!(step, Step::new("Hi", StepKind::Started));
        assert_eq!(session.current_line(), Some("start"));

        // `start` defines nothing, so "Bob" is not recorded and `mid` cannot render yet
        let step = session.step(&graph, Some("Bob")).unwrap();
        assert_eq!(step.text, "undefined placeholder 'name' on line 'mid'");
        assert_eq!(session.current_line(), Some("mid"));
        assert!(session.placeholders().is_empty());

        let step = session.step(&graph, Some("Ann")).unwrap();
        assert_eq!(step, Step::new("Bye", StepKind::Advanced));
        assert_eq!(session.placeholder("name"), Some("Ann"));
    }

    #[test]
    fn test_defines_records_answer_given_on_the_line() {
        let graph = GraphBuilder::new()
            .line(LineRecord::new("start", "Your name?").with_defines("name"))
            .line(LineRecord::new("mid", "Hello {name}"))
            .line(LineRecord::new("end", "Bye {name}"))
            .flow(FlowRecord::new("start", "mid"))
            .flow(FlowRecord::new("mid", "end"))
            .build()
            .unwrap();
        let mut session = Session::new();

        assert_eq!(session.step(&graph, None).unwrap().text, "Your name?");
        assert_eq!(session.step(&graph, Some("Bob")).unwrap().text, "Hello Bob");
        assert_eq!(session.placeholder("name"), Some("Bob"));
        assert_eq!(session.step(&graph, Some("ok")).unwrap().text, "Bye Bob");

        let step = session.step(&graph, Some("anything")).unwrap();
        assert_eq!(step, Step::new(RESTART_TEXT, StepKind::Restarted));
        assert_eq!(session.current_line(), None);

        assert_eq!(session.step(&graph, None).unwrap().text, "Your name?");
    }

    #[test]
    fn test_invalid_answer_does_not_advance() {
        let graph = question_graph();
        let mut session = Session::new();
        session.step(&graph, None).unwrap();

        for _ in 0..2 {
            let step = session.step(&graph, Some("maybe")).unwrap();
            assert_eq!(step.text, "valid answers are: yes, no");
            assert_eq!(step.kind, StepKind::InvalidAnswer);
            assert_eq!(session.current_line(), Some("start"));
        }

        assert_eq!(session.step(&graph, Some("yes")).unwrap().text, "Bye");
    }

    /// Log sink shared with a test subscriber
    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_dead_end_routes_to_end() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let graph = GraphBuilder::new()
            .line(LineRecord::new("start", "Hi"))
            .line(LineRecord::new("stuck", "Nowhere to go"))
            .line(LineRecord::new("end", "Bye"))
            .flow(FlowRecord::on_answer("start", "go", "stuck"))
            .flow(FlowRecord::on_answer("start", "leave", "end"))
            .build()
            .unwrap();
        let mut session = Session::new();
        session.step(&graph, None).unwrap();
        session.step(&graph, Some("go")).unwrap();

        let step = tracing::subscriber::with_default(subscriber, || {
            session.step(&graph, Some("whatever")).unwrap()
        });

        assert_eq!(step, Step::new("Bye", StepKind::DeadEnd));
        assert_eq!(session.current_line(), Some("end"));
        let logs = logs.contents();
        assert!(logs.contains("WARN"));
        assert!(logs.contains("reached a line with no flow, moving to end"));
        assert!(logs.contains("stuck"));
    }

    #[test]
    fn test_undefined_placeholder_is_reported_as_text() {
        let graph = GraphBuilder::new()
            .line(LineRecord::new("start", "Hi {who}"))
            .line(LineRecord::new("end", "Bye"))
            .flow(FlowRecord::new("start", "end"))
            .build()
            .unwrap();
        let mut session = Session::new();

        let step = session.step(&graph, None).unwrap();

        assert_eq!(step.text, "undefined placeholder 'who' on line 'start'");
        assert_eq!(session.current_line(), Some("start"));
    }

    #[test]
    fn test_no_start_line_in_empty_graph() {
        let mut session = Session::new();

        let step = session.step(&Graph::empty(), Some("hello")).unwrap();

        assert_eq!(step, Step::new(NO_START_TEXT, StepKind::NoStart));
        assert_eq!(session.current_line(), None);
    }

    #[test]
    fn test_stale_cursor_restarts() {
        let mut session = Session::new();
        session.step(&greeting_graph(), None).unwrap();
        session.step(&greeting_graph(), Some("Bob")).unwrap();
        assert_eq!(session.current_line(), Some("mid"));

        let step = session.step(&question_graph(), Some("x")).unwrap();

        assert_eq!(step, Step::new("Ready?", StepKind::Started));
    }

    #[test]
    fn test_reset_keeps_placeholders() {
        let graph = GraphBuilder::new()
            .line(LineRecord::new("start", "Name?").with_defines("name"))
            .line(LineRecord::new("end", "Bye {name}"))
            .flow(FlowRecord::new("start", "end"))
            .build()
            .unwrap();
        let mut session = Session::new();
        session.step(&graph, None).unwrap();
        session.step(&graph, Some("Ann")).unwrap();

        session.reset();

        assert_eq!(session.current_line(), None);
        assert_eq!(session.placeholder("name"), Some("Ann"));
    }

    #[test]
    fn test_missing_answer_recorded_as_empty() {
        let graph = GraphBuilder::new()
            .line(LineRecord::new("start", "Name?").with_defines("name"))
            .line(LineRecord::new("end", "Bye [{name}]"))
            .flow(FlowRecord::new("start", "end"))
            .build()
            .unwrap();
        let mut session = Session::new();
        session.step(&graph, None).unwrap();

        assert_eq!(session.step(&graph, None).unwrap().text, "Bye []");
    }
}
