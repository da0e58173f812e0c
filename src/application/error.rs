//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::{
    CommandNotFound, ExecutionError, Frame, Reportable, SourceLocation, TraceControl,
};

/// Errors surfaced by command dispatch.
///
/// Routing layers never wrap or swallow a failure. They only append the frame
/// of their own dispatch level while the error travels outwards.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    NotFound(#[from] CommandNotFound),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl DispatchError {
    /// Record an outer dispatch frame.
    pub fn unwind(mut self, frame: Frame) -> Self {
        match &mut self {
            DispatchError::NotFound(e) => e.push_frame(frame),
            DispatchError::Execution(e) => e.push_frame(frame),
        }
        self
    }

    fn inner(&self) -> &dyn Reportable {
        match self {
            DispatchError::NotFound(e) => e,
            DispatchError::Execution(e) => e,
        }
    }
}

impl Reportable for DispatchError {
    fn type_name(&self) -> &str {
        self.inner().type_name()
    }

    fn location(&self) -> &SourceLocation {
        self.inner().location()
    }

    fn frames(&self) -> &[Frame] {
        self.inner().frames()
    }

    fn trace_control(&self) -> Option<&dyn TraceControl> {
        match self {
            DispatchError::NotFound(e) => e.trace_control(),
            DispatchError::Execution(e) => e.trace_control(),
        }
    }
}

/// Result type for command dispatch.
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Application errors outside of dispatch.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
