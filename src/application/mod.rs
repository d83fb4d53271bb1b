//! Application layer: dispatch services
//!
//! This layer orchestrates domain logic and depends on I/O boundary traits.

pub mod error;
pub mod project_config;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use project_config::{ProjectConfig, ProjectConfigError};
