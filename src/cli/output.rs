//! Terminal output formatting with colors
//!
//! One status line per invocation, always on stdout.
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Prefix of every status line.
pub const PREFIX: &str = "[cli]:";

/// Status line for a successful command.
pub fn success_line() -> String {
    format!("{PREFIX} Command executed successfully.")
}

/// Status line for a failed command.
pub fn error_line(msg: &(impl std::fmt::Display + ?Sized)) -> String {
    format!("{PREFIX} Error: {msg}")
}

/// Print success status (blue)
pub fn success() {
    println!("{}", success_line().blue());
}

/// Print error status (red)
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", error_line(msg).red());
}
