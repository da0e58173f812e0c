//! cmdroute: a small framework for command-line applications.
//!
//! Commands are registered by name on an [`Application`]; one invocation
//! picks a command from the first argument (or the default command) and
//! passes it the rest. [`Collection`] nests commands under a shared prefix.
//! Errors that escape dispatch carry the frames they unwound through and are
//! rendered by a [`ConsoleHandler`] as a summary line plus a stack trace.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{
    command_ref, Application, Call, Collection, Command, CommandRef, ConsoleHandler,
    DispatchError, DispatchResult, Registry, TraceFormatter,
};
pub use domain::{CommandNotFound, ExecutionError, Frame, SourceLocation, Status};
pub use infrastructure::{BufferOutput, Output, Runner, TerminalOutput};
