//! Ordered checkpoint registry

use crate::error::{Error, Result};
use crate::position::PartitionPosition;
use crate::types::{CheckpointId, PartitionId};
use std::collections::BTreeMap;

/// Snapshots of in-flight checkpoints, ordered by checkpoint id
#[derive(Debug, Clone, Default)]
pub struct CheckpointRegistry {
    snapshots: BTreeMap<CheckpointId, Vec<PartitionPosition>>,
}

impl CheckpointRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the snapshot for `checkpoint_id`
    pub fn register(
        &mut self,
        checkpoint_id: CheckpointId,
        positions: Vec<PartitionPosition>,
    ) -> Result<()> {
        if self.snapshots.contains_key(&checkpoint_id) {
            return Err(Error::DuplicateCheckpoint { checkpoint_id });
        }
        self.snapshots.insert(checkpoint_id, positions);
        Ok(())
    }

    /// Remove and return every snapshot with id ≤ `checkpoint_id`, in id order
    pub fn drain_through(
        &mut self,
        checkpoint_id: CheckpointId,
    ) -> BTreeMap<CheckpointId, Vec<PartitionPosition>> {
        match checkpoint_id.checked_add(1) {
            Some(first_kept) => {
                let kept = self.snapshots.split_off(&first_kept);
                std::mem::replace(&mut self.snapshots, kept)
            }
            None => std::mem::take(&mut self.snapshots),
        }
    }

    /// Whether any registered snapshot holds a position for `partition`
    pub fn references(&self, partition: &PartitionId) -> bool {
        self.snapshots
            .values()
            .flatten()
            .any(|position| &position.partition == partition)
    }

    /// Registered checkpoint ids in ascending order
    pub fn ids(&self) -> Vec<CheckpointId> {
        self.snapshots.keys().copied().collect()
    }

    /// Number of registered checkpoints
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether no checkpoint is registered
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drop every snapshot, returning how many were discarded
    pub fn clear(&mut self) -> usize {
        let discarded = self.snapshots.len();
        self.snapshots.clear();
        discarded
    }
}
