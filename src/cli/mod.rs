//! CLI module
//!
//! Command-line interface for replaying reader events through the
//! checkpoint cursor coordinator.
//!
//! # Commands
//!
//! - `replay` - Drive a recorded event script and report the commits
//! - `validate` - Check a script against the reader's calling contract
//! - `show` - Print the contents of a cursor file

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
