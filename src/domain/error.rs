//! Domain-level errors (no external dependencies)

use thiserror::Error;

use super::command::Module;

/// Domain errors represent invalid invocations.
/// These are detected before any I/O happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No command provided.")]
    MissingCommand,

    #[error("No subCommand provided.")]
    MissingSubCommand,

    #[error("Invalid command provided.")]
    InvalidCommand(String),

    #[error("Invalid {module} subCommand - \"{sub_command}\".")]
    UnknownSubCommand { module: Module, sub_command: String },

    #[error("Missing required argument \"{name}\".")]
    MissingRequiredArgument { name: String },
}
