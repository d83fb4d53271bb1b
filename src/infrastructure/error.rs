//! Errors from the process boundary

use thiserror::Error;

use crate::application::ApplicationError;

/// Dispatch errors plus failures touching the host (working directory, stdio).
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("Could not {action}: {source}")]
    Io {
        action: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    /// `action` reads as a verb phrase, e.g. "resolve working directory".
    pub fn io(action: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            action: action.into(),
            source,
        }
    }
}

pub type InfraResult<T> = Result<T, InfraError>;
