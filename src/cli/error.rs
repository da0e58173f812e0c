//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::{ApplicationError, DispatchError};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Dispatch(#[from] DispatchError),

    #[error("{0}")]
    Application(#[from] ApplicationError),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Dispatch(DispatchError::NotFound(_)) => crate::exitcode::USAGE,
            CliError::Dispatch(DispatchError::Execution(_)) => crate::exitcode::SOFTWARE,
            CliError::Application(ApplicationError::Config { .. }) => crate::exitcode::CONFIG,
        }
    }
}
