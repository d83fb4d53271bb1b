//! Command resolution: positionals to a typed invocation
//!
//! The code generator's operations are a closed set. A `(command, subCommand)`
//! pair is turned into a method name by concatenation and looked up in
//! [`GeneratorMethod::ALL`]; migrations sub-commands map to [`MigrationTask`].

use std::fmt;

use super::error::DomainError;

/// Argument-schema namespace a method belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    CodeGenerator,
    Migrations,
}

impl Module {
    pub fn as_str(self) -> &'static str {
        match self {
            Module::CodeGenerator => "codeGenerator",
            Module::Migrations => "migrations",
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level CLI verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Generate,
    Build,
    Migrations,
}

impl Command {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "generate" => Some(Command::Generate),
            "build" => Some(Command::Build),
            "migrations" => Some(Command::Migrations),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Command::Generate => "generate",
            Command::Build => "build",
            Command::Migrations => "migrations",
        }
    }

    /// Module whose schema table serves this command.
    pub fn module(self) -> Module {
        match self {
            Command::Generate | Command::Build => Module::CodeGenerator,
            Command::Migrations => Module::Migrations,
        }
    }
}

/// A validated `(command, subCommand)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    pub sub_command: String,
}

/// Split the leading positionals into command and sub-command.
///
/// Presence is checked before the command is recognised, so a bare unknown
/// verb still reports the missing sub-command first.
pub fn resolve_command(positionals: &[String]) -> Result<Invocation, DomainError> {
    let command = positionals
        .first()
        .filter(|c| !c.is_empty())
        .ok_or(DomainError::MissingCommand)?;
    let sub_command = positionals
        .get(1)
        .filter(|s| !s.is_empty())
        .ok_or(DomainError::MissingSubCommand)?;

    let command =
        Command::parse(command).ok_or_else(|| DomainError::InvalidCommand(command.clone()))?;

    Ok(Invocation {
        command,
        sub_command: sub_command.clone(),
    })
}

/// `generate` + `layoutFile` → `generateLayoutFile`.
///
/// Only the first character of the sub-command is upper-cased; the rest is
/// kept as typed (`NGINXConfig` stays `NGINXConfig`).
pub fn synthesize_method_name(command: &str, sub_command: &str) -> String {
    let mut chars = sub_command.chars();
    let mut name = String::with_capacity(command.len() + sub_command.len());
    name.push_str(command);
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name
}

/// Operations of the external code generator that this CLI can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneratorMethod {
    BuildLayoutFile,
    GenerateImagesRedirectNginxConfig,
    GenerateNginxConfig,
    GenerateLayoutFile,
    GenerateBlankProject,
    GenerateBasicProject,
}

impl GeneratorMethod {
    pub const ALL: [GeneratorMethod; 6] = [
        GeneratorMethod::BuildLayoutFile,
        GeneratorMethod::GenerateImagesRedirectNginxConfig,
        GeneratorMethod::GenerateNginxConfig,
        GeneratorMethod::GenerateLayoutFile,
        GeneratorMethod::GenerateBlankProject,
        GeneratorMethod::GenerateBasicProject,
    ];

    /// Method name as exposed by the generator library.
    pub fn as_str(self) -> &'static str {
        match self {
            GeneratorMethod::BuildLayoutFile => "buildLayoutFile",
            GeneratorMethod::GenerateImagesRedirectNginxConfig => {
                "generateImagesRedirectNGINXConfig"
            }
            GeneratorMethod::GenerateNginxConfig => "generateNGINXConfig",
            GeneratorMethod::GenerateLayoutFile => "generateLayoutFile",
            GeneratorMethod::GenerateBlankProject => "generateBlankProject",
            GeneratorMethod::GenerateBasicProject => "generateBasicProject",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }

    /// Look up the method for a `generate`/`build` invocation.
    pub fn resolve(invocation: &Invocation) -> Result<Self, DomainError> {
        let name = synthesize_method_name(invocation.command.as_str(), &invocation.sub_command);
        Self::from_name(&name).ok_or_else(|| DomainError::UnknownSubCommand {
            module: Module::CodeGenerator,
            sub_command: invocation.sub_command.clone(),
        })
    }
}

impl fmt::Display for GeneratorMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Endpoints of the migrations server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MigrationTask {
    Seed,
    Sync,
    GenerateSeed,
    GenerateBackup,
    InsertStaticData,
}

impl MigrationTask {
    pub const ALL: [MigrationTask; 5] = [
        MigrationTask::Seed,
        MigrationTask::Sync,
        MigrationTask::GenerateSeed,
        MigrationTask::GenerateBackup,
        MigrationTask::InsertStaticData,
    ];

    /// Sub-command name, also the endpoint path segment.
    pub fn as_str(self) -> &'static str {
        match self {
            MigrationTask::Seed => "seed",
            MigrationTask::Sync => "sync",
            MigrationTask::GenerateSeed => "generateSeed",
            MigrationTask::GenerateBackup => "generateBackup",
            MigrationTask::InsertStaticData => "insertStaticData",
        }
    }

    pub fn parse(sub_command: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == sub_command)
            .ok_or_else(|| DomainError::UnknownSubCommand {
                module: Module::Migrations,
                sub_command: sub_command.to_string(),
            })
    }
}

impl fmt::Display for MigrationTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
