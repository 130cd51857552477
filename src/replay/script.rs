//! Replay script types and loading

use crate::error::{Error, Result};
use crate::reader::PartitionSplit;
use crate::types::{CheckpointId, Offset, PartitionId};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A recorded sequence of reader events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Subscription for splits that do not name one
    #[serde(default)]
    pub subscription: Option<String>,

    /// Events in the order they happened
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub events: Vec<ReplayEvent>,
}

impl ReplayScript {
    /// Subscription used for `partition`-only references
    pub fn subscription_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.subscription.as_deref().unwrap_or(fallback)
    }
}

/// A single reader event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayEvent {
    /// Splits assigned to the reader
    AddSplits(Vec<SplitSpec>),
    /// A record was emitted
    Emit(EmitEvent),
    /// A checkpoint snapshot was taken
    Checkpoint(CheckpointId),
    /// A checkpoint was confirmed complete
    Complete(CheckpointId),
    /// Partitions were permanently drained
    Finish(Vec<SplitRef>),
}

/// Split reference within a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSpec {
    /// Subscription, defaulting to the script's
    #[serde(default)]
    pub subscription: Option<String>,
    /// Partition number
    pub partition: u64,
    /// Offset to start reading from
    #[serde(default)]
    pub start: Offset,
}

impl SplitSpec {
    /// Resolve into a split, using `subscription` when none is named
    pub fn to_split(&self, subscription: &str) -> PartitionSplit {
        PartitionSplit::new(
            self.subscription.as_deref().unwrap_or(subscription),
            self.partition,
            self.start,
        )
    }
}

/// Emitted record reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmitEvent {
    /// Subscription, defaulting to the script's
    #[serde(default)]
    pub subscription: Option<String>,
    /// Partition number
    pub partition: u64,
    /// Offset of the emitted record
    pub offset: Offset,
}

impl EmitEvent {
    /// Partition id, using `subscription` when none is named
    pub fn partition_id(&self, subscription: &str) -> PartitionId {
        PartitionId::of(
            self.subscription.as_deref().unwrap_or(subscription),
            self.partition,
        )
    }
}

/// Reference to an assigned split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRef {
    /// Subscription, defaulting to the script's
    #[serde(default)]
    pub subscription: Option<String>,
    /// Partition number
    pub partition: u64,
}

impl SplitRef {
    /// Partition id, using `subscription` when none is named
    pub fn partition_id(&self, subscription: &str) -> PartitionId {
        PartitionId::of(
            self.subscription.as_deref().unwrap_or(subscription),
            self.partition,
        )
    }
}

/// Load a replay script from a YAML or JSON file
pub fn load_script(path: impl AsRef<Path>) -> Result<ReplayScript> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read replay script '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    if path.extension().is_some_and(|ext| ext == "json") {
        Ok(serde_json::from_str(&content)?)
    } else {
        load_script_from_str(&content)
    }
}

/// Load a replay script from a YAML string
///
/// Each event is a single-key map naming the event, e.g. `- checkpoint: 1`.
pub fn load_script_from_str(yaml: &str) -> Result<ReplayScript> {
    Ok(serde_yaml::from_str(yaml)?)
}
