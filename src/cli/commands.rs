//! Command execution: guard → parse → dispatch

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::application::services::DispatchRequest;
use crate::cli::args::{misplaced_global_option, Cli, ParsedArgs};
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::domain::{resolve_command, Command};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Run one invocation end to end.
///
/// The generation library is located before the arguments are looked at,
/// so a missing library is reported even for an empty command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(option) = misplaced_global_option(&cli.args) {
        return Err(CliError::InvalidArgs(format!(
            "global option \"{option}\" must come before the command"
        )));
    }
    let working_dir = resolve_working_dir(cli.project_dir.as_deref())?;
    let settings = Settings::load()?;
    if let Ok(toml) = settings.to_toml() {
        debug!("effective settings:\n{}", toml);
    }

    let container = ServiceContainer::new(&settings, working_dir)?;
    dispatch(&container, &cli.args)
}

/// Parse free-form `args` and run the matching dispatch path.
#[instrument(level = "debug", skip(container))]
pub fn dispatch(container: &ServiceContainer, args: &[String]) -> CliResult<()> {
    let parsed = ParsedArgs::parse(args);
    let invocation = resolve_command(&parsed.positionals)?;
    debug!(
        "command={} sub_command={} flags={:?}",
        invocation.command.as_str(),
        invocation.sub_command,
        parsed.flags
    );

    let request = DispatchRequest {
        invocation,
        flags: parsed.flags,
        working_dir: container.working_dir.clone(),
    };
    match request.invocation.command {
        Command::Generate | Command::Build => container.generator.run(&request)?,
        Command::Migrations => container.migrations.run(&request)?,
    }
    Ok(())
}

fn resolve_working_dir(project_dir: Option<&Path>) -> CliResult<PathBuf> {
    let cwd =
        std::env::current_dir().map_err(|e| InfraError::io("resolve working directory", e))?;
    Ok(match project_dir {
        Some(dir) => cwd.join(dir),
        None => cwd,
    })
}
