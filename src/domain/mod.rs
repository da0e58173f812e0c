//! Domain layer: frames, command status, and the error taxonomy
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;

pub use entities::*;
pub use error::{CommandNotFound, ExecutionError, Reportable, TraceControl};
