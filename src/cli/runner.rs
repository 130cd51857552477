//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::commit::FileCommitter;
use crate::config::{load_config, CommitterConfig, CursorConfig};
use crate::coordinator::CheckpointCursorCoordinator;
use crate::error::{Error, Result};
use crate::reader::SourceReader;
use crate::replay::{load_script, replay, validate_script};
use serde_json::{json, Value};
use std::path::Path;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Replay {
                script,
                cursor_file,
                keep_going,
            } => {
                self.replay(script, cursor_file.as_deref(), *keep_going)
                    .await
            }
            Commands::Validate { script } => self.validate(script),
            Commands::Show { cursor_file } => self.show(cursor_file),
        }
    }

    /// Load configuration, falling back to defaults
    fn load_config(&self) -> Result<CursorConfig> {
        match &self.cli.config {
            Some(path) => load_config(path),
            None => Ok(CursorConfig::default()),
        }
    }

    /// Replay an event script
    async fn replay(
        &self,
        script_path: &Path,
        cursor_file: Option<&Path>,
        keep_going: bool,
    ) -> Result<()> {
        let mut config = self.load_config()?;
        if let Some(path) = cursor_file {
            config.committer = CommitterConfig::File {
                path: path.to_path_buf(),
            };
        }
        let script = load_script(script_path)?;

        let committer = config.committer.build()?;
        info!(
            committer = committer.name(),
            events = script.events.len(),
            "Replaying event script"
        );

        let mut reader = SourceReader::new(CheckpointCursorCoordinator::with_shared(committer));
        let fail_fast = config.fail_on_commit_error && !keep_going;
        let result = replay(&mut reader, &script, &config.subscription, fail_fast).await;
        reader.close().await;
        let report = result?;

        for completion in &report.completions {
            self.output_message(&json!({
                "type": "COMMIT",
                "commit": completion
            }));
        }
        for failure in &report.failures {
            self.output_log("WARN", failure);
        }
        self.output_message(&json!({
            "type": "SUMMARY",
            "summary": {
                "events": report.events,
                "pending_checkpoints": report.pending_checkpoints,
                "stats": report.stats,
                "duration_ms": report.duration_ms
            }
        }));

        Ok(())
    }

    /// Validate an event script
    fn validate(&self, script_path: &Path) -> Result<()> {
        let config = self.load_config()?;
        let script = load_script(script_path)?;
        let violations = validate_script(&script, &config.subscription);

        if violations.is_empty() {
            self.output_log(
                "INFO",
                &format!(
                    "Script '{}' is valid with {} events",
                    script_path.display(),
                    script.events.len()
                ),
            );
            return Ok(());
        }

        for violation in &violations {
            self.output_log("ERROR", &violation.to_string());
        }
        Err(Error::config(format!(
            "Script '{}' has {} contract violation(s)",
            script_path.display(),
            violations.len()
        )))
    }

    /// Show a cursor file
    fn show(&self, cursor_file: &Path) -> Result<()> {
        let file = FileCommitter::read(cursor_file)?;
        self.output_message(&json!({
            "type": "CURSORS",
            "cursors": file.cursors
        }));
        Ok(())
    }

    /// Output a log message
    fn output_log(&self, level: &str, message: &str) {
        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": level,
                "message": message
            }
        }));
    }

    /// Output a message in the selected format
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}
