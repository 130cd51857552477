//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Checkpoint-synchronized cursor commit CLI
#[derive(Parser, Debug)]
#[command(name = "checkpoint-cursor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay an event script through the coordinator
    Replay {
        /// Event script (YAML or JSON)
        script: PathBuf,

        /// Persist commits to this cursor file (overrides the configured committer)
        #[arg(long)]
        cursor_file: Option<PathBuf>,

        /// Keep going after a failed checkpoint completion
        #[arg(long)]
        keep_going: bool,
    },

    /// Check an event script against the reader contract
    Validate {
        /// Event script (YAML or JSON)
        script: PathBuf,
    },

    /// Show committed cursors
    Show {
        /// Cursor file written by the file committer
        cursor_file: PathBuf,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
