//! CLI-level errors (wraps domain and config errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::{ChainError, CompositeError, DomainError};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("write output: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CompositeError> for CliError {
    fn from(e: CompositeError) -> Self {
        CliError::Domain(e.into())
    }
}

impl From<ChainError> for CliError {
    fn from(e: ChainError) -> Self {
        CliError::Domain(e.into())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Domain(_) => crate::exitcode::SOFTWARE,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Io(_) => crate::exitcode::IOERR,
        }
    }
}
