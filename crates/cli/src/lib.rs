//! sm2-kex CLI library
//!
//! Argument parsing and command execution for the `sm2-kex` binary.

pub mod args;
pub mod commands;

pub use args::{CliArgs, Command, LogLevel, Variant};
pub use commands::{load_config, run};
