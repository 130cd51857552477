//! Configuration types
//!
//! Configuration is loaded from YAML (or JSON) and selects the commit
//! mechanism plus replay behavior.
//!
//! ```yaml
//! committer:
//!   type: file
//!   path: cursors.json
//! subscription: projects/demo/locations/us-central1-a/subscriptions/orders
//! fail_on_commit_error: true
//! ```

use crate::commit::{FileCommitter, LogCommitter, MemoryCommitter, PartitionCommitter};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorConfig {
    /// Commit mechanism
    #[serde(default)]
    pub committer: CommitterConfig,

    /// Default subscription for splits that do not name one
    #[serde(default = "default_subscription")]
    pub subscription: String,

    /// Stop replay at the first failed checkpoint completion
    #[serde(default = "default_fail_on_commit_error")]
    pub fail_on_commit_error: bool,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            committer: CommitterConfig::default(),
            subscription: default_subscription(),
            fail_on_commit_error: default_fail_on_commit_error(),
        }
    }
}

fn default_subscription() -> String {
    "default".to_string()
}

fn default_fail_on_commit_error() -> bool {
    true
}

impl CursorConfig {
    /// Validate field values
    pub fn validate(&self) -> Result<()> {
        if self.subscription.trim().is_empty() {
            return Err(Error::invalid_value(
                "subscription",
                "must not be empty",
            ));
        }
        if let CommitterConfig::File { path } = &self.committer {
            if path.as_os_str().is_empty() {
                return Err(Error::invalid_value("committer.path", "must not be empty"));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Committer Config
// ============================================================================

/// Which commit mechanism to use
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CommitterConfig {
    /// Log each commit
    #[default]
    Log,
    /// Keep commits in memory
    Memory,
    /// Persist commits to a cursor file
    File {
        /// Cursor file path
        path: PathBuf,
    },
}

impl CommitterConfig {
    /// Build the configured committer
    pub fn build(&self) -> Result<Arc<dyn PartitionCommitter>> {
        Ok(match self {
            CommitterConfig::Log => Arc::new(LogCommitter::new()),
            CommitterConfig::Memory => Arc::new(MemoryCommitter::new()),
            CommitterConfig::File { path } => Arc::new(FileCommitter::open(path)?),
        })
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load configuration from a YAML or JSON file
pub fn load_config(path: impl AsRef<Path>) -> Result<CursorConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    if path.extension().is_some_and(|ext| ext == "json") {
        let config: CursorConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    } else {
        load_config_from_str(&content)
    }
}

/// Load configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<CursorConfig> {
    let config: CursorConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}
