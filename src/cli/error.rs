//! CLI-level errors (wraps application and infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::{InfraError, StoreError};

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Store(e) => store_exit_code(e),
                InfraError::Application(e) => application_exit_code(e),
            },
            CliError::Application(e) => application_exit_code(e),
        }
    }
}

fn application_exit_code(e: &ApplicationError) -> i32 {
    match e {
        ApplicationError::Domain(DomainError::RecordNotFound { .. }) => crate::exitcode::NOINPUT,
        ApplicationError::Domain(_) => crate::exitcode::DATAERR,
        ApplicationError::Store(e) => store_exit_code(e),
        ApplicationError::Decode { .. } | ApplicationError::Encode { .. } => {
            crate::exitcode::DATAERR
        }
        ApplicationError::Config { .. } => crate::exitcode::CONFIG,
    }
}

fn store_exit_code(e: &StoreError) -> i32 {
    match e {
        StoreError::NotFound { .. } => crate::exitcode::NOINPUT,
        StoreError::Io { .. } => crate::exitcode::IOERR,
        StoreError::Malformed { .. } | StoreError::MissingId => crate::exitcode::DATAERR,
        StoreError::Conflict { .. } => crate::exitcode::SOFTWARE,
    }
}
