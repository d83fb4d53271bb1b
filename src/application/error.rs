//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{DomainError, Module};

/// Application errors wrap domain errors and add dispatch-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Could not find the code generation library at \"{}\". Please run this command from the project root directory.", .0.display())]
    LibraryNotFound(PathBuf),

    #[error("Could not find a valid config in this directory when loading ./config/index. A project config is required for executing the \"{sub_command}\" {module} subCommand. Please run this command from the project root directory.")]
    MissingProjectConfig {
        sub_command: String,
        module: Module,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The generator reported failure; its message is surfaced verbatim.
    #[error("{message}")]
    GeneratorFailed { message: String },

    #[error("Execution error: unexpected status code {code}")]
    UnexpectedStatus { code: u16 },

    #[error("Execution error: {message}")]
    Transport { message: String },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
