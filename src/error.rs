//! Error types for checkpoint-cursor
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::types::{CheckpointId, Offset, PartitionId};
use thiserror::Error;

/// The main error type for checkpoint-cursor
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Protocol Errors
    // ============================================================================
    #[error("Checkpoint {checkpoint_id} is already registered")]
    DuplicateCheckpoint { checkpoint_id: CheckpointId },

    #[error("Coordinator is closed")]
    CoordinatorClosed,

    #[error("Split '{partition}' is not assigned to this reader")]
    UnknownSplit { partition: PartitionId },

    // ============================================================================
    // Commit Errors
    // ============================================================================
    #[error("Commit failed for partition '{partition}': {message}")]
    Commit {
        partition: PartitionId,
        message: String,
    },

    #[error("Cursor commit failed for {} partition(s) at checkpoint {checkpoint_id}: {}", .failures.len(), summarize(.failures))]
    CommitFailed {
        checkpoint_id: CheckpointId,
        failures: Vec<CommitFailure>,
    },

    // ============================================================================
    // State Errors
    // ============================================================================
    #[error("State error: {message}")]
    State { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

/// A single failed partition commit within a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFailure {
    /// Partition whose commit failed
    pub partition: PartitionId,
    /// Offset that could not be committed
    pub offset: Offset,
    /// Error message from the committer
    pub message: String,
}

impl std::fmt::Display for CommitFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}: {}", self.partition, self.offset, self.message)
    }
}

fn summarize(failures: &[CommitFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a single-partition commit error
    pub fn commit(partition: PartitionId, message: impl Into<String>) -> Self {
        Self::Commit {
            partition,
            message: message.into(),
        }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    ///
    /// Commit failures leave the failed positions pending, so the caller may
    /// retry the completion notice. Contract violations are never retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Commit { .. } | Error::CommitFailed { .. } | Error::Io(_)
        )
    }
}

/// Result type alias for checkpoint-cursor
pub type Result<T> = std::result::Result<T, Error>;
