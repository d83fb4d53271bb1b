//! Process exit codes
//!
//! Every failure, whatever its kind, exits with the same code.

/// Successful termination
pub const OK: i32 = 0;

/// Any failure
pub const FAILURE: i32 = 1;
