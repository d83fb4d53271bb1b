//! Domain layer: command resolution and argument schema
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod command;
pub mod error;
pub mod resolver;
pub mod schema;

pub use command::{
    resolve_command, synthesize_method_name, Command, GeneratorMethod, Invocation, MigrationTask,
    Module,
};
pub use error::DomainError;
pub use resolver::{build_arguments, ResolvedArgument, ResolvedArguments};
pub use schema::{schema_for, ArgDefault, ArgSpec, MethodKey};
