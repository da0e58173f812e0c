//! Domain-level errors and the error-inspection contract used by trace rendering

use std::fmt;

use itertools::Itertools;
use thiserror::Error;

use crate::domain::entities::{Frame, SourceLocation};

/// Capability for errors that decide on their own whether a trace is shown.
///
/// Errors without this capability always allow a trace.
pub trait TraceControl {
    fn can_add_trace(&self) -> bool;
}

/// What an error handler needs to know about a captured error.
pub trait Reportable: fmt::Display {
    /// Short type name shown in the summary line.
    fn type_name(&self) -> &str;

    /// Where the error was raised.
    fn location(&self) -> &SourceLocation;

    /// Captured frames, innermost first.
    fn frames(&self) -> &[Frame];

    /// Optional trace-control capability.
    fn trace_control(&self) -> Option<&dyn TraceControl> {
        None
    }
}

/// A name did not resolve in a registry.
///
/// Classified internal: its trace is hidden unless explicitly included.
#[derive(Error, Debug, Clone)]
#[error("command \"{name}\" is not defined{}", hint(.name, .known))]
pub struct CommandNotFound {
    name: String,
    known: Vec<String>,
    location: SourceLocation,
    frames: Vec<Frame>,
}

impl CommandNotFound {
    #[track_caller]
    pub fn new<I, S>(name: impl Into<String>, known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            known: known.into_iter().map(Into::into).sorted().collect(),
            location: SourceLocation::caller(),
            frames: Vec::new(),
        }
    }

    /// The name that failed to resolve.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names registered at the level where resolution failed, sorted.
    pub fn known(&self) -> &[String] {
        &self.known
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }
}

fn hint(name: &str, known: &[String]) -> String {
    let similar: Vec<&String> = known
        .iter()
        .filter(|k| !name.is_empty() && (k.contains(name) || name.contains(k.as_str())))
        .collect();

    if !similar.is_empty() {
        format!(
            " (did you mean {}?)",
            similar.iter().map(|k| format!("\"{k}\"")).join(", ")
        )
    } else if known.is_empty() {
        String::new()
    } else {
        format!(" (available: {})", known.join(", "))
    }
}

impl TraceControl for CommandNotFound {
    fn can_add_trace(&self) -> bool {
        false
    }
}

impl Reportable for CommandNotFound {
    fn type_name(&self) -> &str {
        "CommandNotFound"
    }

    fn location(&self) -> &SourceLocation {
        &self.location
    }

    fn frames(&self) -> &[Frame] {
        &self.frames
    }

    fn trace_control(&self) -> Option<&dyn TraceControl> {
        Some(self)
    }
}

/// Failure raised inside a command's own execution.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ExecutionError {
    message: String,
    location: SourceLocation,
    frames: Vec<Frame>,
    hide_trace: bool,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ExecutionError {
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: SourceLocation::caller(),
            frames: Vec::new(),
            hide_trace: false,
            source: None,
        }
    }

    /// Execution failure caused by another error.
    #[track_caller]
    pub fn caused_by(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::new(message)
        }
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Classify as internal: the trace is hidden unless internal errors are included.
    pub fn hide_trace(mut self) -> Self {
        self.hide_trace = true;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }
}

impl Reportable for ExecutionError {
    fn type_name(&self) -> &str {
        "ExecutionError"
    }

    fn location(&self) -> &SourceLocation {
        &self.location
    }

    fn frames(&self) -> &[Frame] {
        &self.frames
    }

    fn trace_control(&self) -> Option<&dyn TraceControl> {
        if self.hide_trace {
            Some(self)
        } else {
            None
        }
    }
}

impl TraceControl for ExecutionError {
    fn can_add_trace(&self) -> bool {
        !self.hide_trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_unknown_name_when_not_found_then_lists_available_commands() {
        let err = CommandNotFound::new("deploy", ["list", "help"]);
        assert_eq!(err.name(), "deploy");
        assert_eq!(err.known(), ["help", "list"]);
        assert_eq!(
            err.to_string(),
            "command \"deploy\" is not defined (available: help, list)"
        );
    }

    #[test]
    fn given_partial_name_when_not_found_then_suggests_similar() {
        let err = CommandNotFound::new("migr", ["db:migrate", "list", "migrate"]);
        assert_eq!(
            err.to_string(),
            "command \"migr\" is not defined (did you mean \"db:migrate\", \"migrate\"?)"
        );
    }

    #[test]
    fn given_empty_registry_when_not_found_then_no_hint() {
        let err = CommandNotFound::new("x", Vec::<String>::new());
        assert_eq!(err.to_string(), "command \"x\" is not defined");
    }

    #[test]
    fn given_command_not_found_when_queried_then_hides_trace() {
        let err = CommandNotFound::new("x", ["y"]);
        let control = err.trace_control().map(|c| c.can_add_trace());
        assert_eq!(control, Some(false));
    }

    #[test]
    fn given_execution_error_when_created_then_records_caller_location() {
        let err = ExecutionError::new("boom");
        assert!(err.location().file.ends_with("error.rs"));
        assert!(err.trace_control().is_none());
        assert_eq!(err.type_name(), "ExecutionError");
    }

    #[test]
    fn given_hidden_trace_when_queried_then_capability_reports_internal() {
        let err = ExecutionError::new("quiet").hide_trace();
        let control = err.trace_control().map(|c| c.can_add_trace());
        assert_eq!(control, Some(false));
    }

    #[test]
    fn given_cause_when_wrapping_then_source_is_kept() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = ExecutionError::caused_by("cannot save", io);
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("disk gone"));
    }
}
