//! Application services: the two dispatch paths

pub mod generator;
pub mod migrations;

use std::collections::BTreeMap;
use std::path::PathBuf;

pub use generator::GeneratorService;
pub use migrations::MigrationsService;

use crate::domain::Invocation;

/// Everything a dispatch path needs from the command line.
#[derive(Debug, Clone)]
pub struct DispatchRequest {
    pub invocation: Invocation,
    pub flags: BTreeMap<String, String>,
    /// Base for `addCWD` arguments and defaults
    pub working_dir: PathBuf,
}
