//! CLI argument definitions using clap
//!
//! clap owns the global options; everything after them is free-form
//! (`<command> <subCommand> [--name=value ...]`) and split by [`ParsedArgs`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

/// Dispatch code generation and migrations commands for a project
#[derive(Parser, Debug)]
#[command(name = "gencli")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Commands:\n  \
    generate <subCommand>    imagesRedirectNGINXConfig, NGINXConfig, layoutFile, blankProject, basicProject\n  \
    build <subCommand>       layoutFile\n  \
    migrations <subCommand>  seed, sync, generateSeed, generateBackup, insertStaticData\n\n\
    Arguments are passed as --name=value, e.g. `gencli build layoutFile --clientModuleName=site`.\n\
    Global options (-d, -C) must come before the command.")]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// <command> <subCommand> [--name=value ...]
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..
    )]
    pub args: Vec<String>,
}

/// Free-form tokens split into positionals and flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub positionals: Vec<String>,
    pub flags: BTreeMap<String, String>,
}

impl ParsedArgs {
    /// Split tokens the way a yargs-style parser does.
    ///
    /// - `--name=value` and `--name value` set a flag
    /// - a bare `--name` is `"true"`, a bare `--no-name` sets `name` to `"false"`
    /// - `--kebab-name` is also available as `kebabName`
    /// - `--` ends flag parsing
    /// - the last occurrence of a flag wins
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut parsed = ParsedArgs::default();
        let mut iter = tokens.iter().map(<S as AsRef<str>>::as_ref).peekable();

        while let Some(token) = iter.next() {
            if token == "--" {
                parsed
                    .positionals
                    .extend(iter.by_ref().map(str::to_string));
                break;
            }

            let Some(body) = flag_body(token) else {
                parsed.positionals.push(token.to_string());
                continue;
            };

            if let Some((name, value)) = body.split_once('=') {
                parsed.insert(name, value.to_string());
            } else if let Some(value) =
                iter.next_if(|next| flag_body(next).is_none() && *next != "--")
            {
                parsed.insert(body, value.to_string());
            } else if let Some(negated) = body.strip_prefix("no-") {
                parsed.insert(negated, "false".to_string());
            } else {
                parsed.insert(body, "true".to_string());
            }
        }
        parsed
    }

    fn insert(&mut self, name: &str, value: String) {
        if name.is_empty() {
            return;
        }
        let camel = camel_case(name);
        if camel != name {
            self.flags.insert(camel, value.clone());
        }
        self.flags.insert(name.to_string(), value);
    }
}

/// First global option (`-d`, `-C` and their long forms) found among the
/// free-form tokens. clap only sees options placed before the command.
pub fn misplaced_global_option(tokens: &[String]) -> Option<&str> {
    tokens
        .iter()
        .map(String::as_str)
        .take_while(|t| *t != "--")
        .find(|t| {
            matches!(*t, "--debug" | "--project-dir")
                || t.starts_with("--project-dir=")
                || t.starts_with("-C")
                || t.strip_prefix('-')
                    .is_some_and(|s| !s.is_empty() && s.chars().all(|c| c == 'd'))
        })
}

/// Name part of a flag token, or `None` for a positional.
fn flag_body(token: &str) -> Option<&str> {
    if let Some(long) = token.strip_prefix("--") {
        return (!long.is_empty()).then_some(long);
    }
    let short = token.strip_prefix('-')?;
    short
        .chars()
        .next()
        .filter(char::is_ascii_alphabetic)
        .map(|_| short)
}

/// `output-path` → `outputPath`.
fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '-' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
