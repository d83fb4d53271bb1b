//! gencli: command dispatcher for a project's code generator and migrations server
//!
//! `gencli <command> <subCommand> [--name=value ...]` resolves the pair against
//! a static argument schema and then either runs a method of the project's
//! code-generation library or calls the project's migrations server.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
