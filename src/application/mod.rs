//! Application layer: command routing, built-in commands, error rendering
//!
//! This layer orchestrates domain types and depends on I/O boundary traits.

pub mod app;
pub mod collection;
pub mod command;
pub mod commands;
pub mod error;
pub mod handler;
pub mod registry;
pub mod trace;

pub use app::Application;
pub use collection::Collection;
pub use command::{Command, CommandRef};
pub use commands::Call;
pub use error::{ApplicationError, ApplicationResult, DispatchError, DispatchResult};
pub use handler::{ConsoleHandler, Handler, HandlerSignal};
pub use registry::{command_ref, DefaultTarget, Registry};
pub use trace::{FunctionArgs, TraceFormatter, TraceRenderOptions};
