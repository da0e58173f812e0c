//! Infrastructure layer: output sinks and the process-wide error hook
//!
//! This layer implements I/O boundary traits.

pub mod hook;
pub mod traits;

pub use hook::{ErrorHook, PanicReport, Runner};
pub use traits::{BufferOutput, Output, Style, TerminalOutput};
