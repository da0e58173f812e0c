//! CLI layer: argument parsing and the bundled command set

pub mod args;
pub mod commands;
pub mod error;
pub mod output;

pub use args::Cli;
pub use commands::{build_application, build_error_hook};
pub use error::{CliError, CliResult};
