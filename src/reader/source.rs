//! Checkpoint-aware source reader

use super::split::{PartitionSplit, SplitState};
use crate::coordinator::{CheckpointCursorCoordinator, CommitReport};
use crate::error::{Error, Result};
use crate::types::{CheckpointId, Offset, PartitionId};
use std::collections::BTreeMap;
use tracing::debug;

/// Source reader that commits cursors only after checkpoints complete
///
/// A snapshot of every active split is handed to the coordinator when a
/// checkpoint starts. Its cursors are committed once the pipeline reports the
/// checkpoint complete. Splits that finish are forwarded separately, since
/// they will not appear in any later snapshot.
#[derive(Debug)]
pub struct SourceReader {
    coordinator: CheckpointCursorCoordinator,
    splits: BTreeMap<PartitionId, SplitState>,
}

impl SourceReader {
    /// Create a reader driving `coordinator`
    pub fn new(coordinator: CheckpointCursorCoordinator) -> Self {
        Self {
            coordinator,
            splits: BTreeMap::new(),
        }
    }

    /// Get the coordinator
    pub fn coordinator(&self) -> &CheckpointCursorCoordinator {
        &self.coordinator
    }

    /// Take ownership of newly assigned splits
    ///
    /// A split that is already assigned keeps its current progress.
    pub fn add_splits<I>(&mut self, splits: I)
    where
        I: IntoIterator<Item = PartitionSplit>,
    {
        for split in splits {
            let id = split.id();
            debug!(partition = %id, start = %split.start, "Assigned split");
            self.splits
                .entry(id)
                .or_insert_with(|| SplitState::new(split));
        }
    }

    /// Record that the record at `offset` of `partition` was emitted
    pub fn record_emitted(&mut self, partition: &PartitionId, offset: Offset) -> Result<()> {
        let state = self
            .splits
            .get_mut(partition)
            .ok_or_else(|| Error::UnknownSplit {
                partition: partition.clone(),
            })?;
        state.record_emitted(offset);
        Ok(())
    }

    /// Current read offset of an assigned split
    pub fn current_offset(&self, partition: &PartitionId) -> Option<Offset> {
        self.splits.get(partition).map(SplitState::current)
    }

    /// Active splits with their current read offsets, in partition order
    pub fn active_splits(&self) -> Vec<PartitionSplit> {
        self.splits.values().map(SplitState::to_split).collect()
    }

    /// Snapshot every active split for `checkpoint_id`
    ///
    /// The returned splits are what the pipeline persists; their cursors are
    /// registered with the coordinator and committed on completion.
    pub async fn snapshot_state(&self, checkpoint_id: CheckpointId) -> Result<Vec<PartitionSplit>> {
        let splits = self.active_splits();
        let positions = splits.iter().map(PartitionSplit::position).collect();
        self.coordinator
            .add_checkpoint(checkpoint_id, positions)
            .await?;
        Ok(splits)
    }

    /// Forward a checkpoint completion to the coordinator
    pub async fn notify_checkpoint_complete(
        &self,
        checkpoint_id: CheckpointId,
    ) -> Result<CommitReport> {
        self.coordinator
            .notify_checkpoint_complete(checkpoint_id)
            .await
    }

    /// Retire finished splits and hand their terminal positions to the coordinator
    ///
    /// Returns the retired splits. Unknown partitions are rejected before any
    /// split is retired.
    pub async fn finish_splits(&mut self, partitions: &[PartitionId]) -> Result<Vec<PartitionSplit>> {
        if let Some(unknown) = partitions.iter().find(|p| !self.splits.contains_key(*p)) {
            return Err(Error::UnknownSplit {
                partition: unknown.clone(),
            });
        }

        let finished: Vec<PartitionSplit> = partitions
            .iter()
            .filter_map(|p| self.splits.remove(p))
            .map(|state| state.to_split())
            .collect();

        self.coordinator
            .notify_split_finished(finished.iter().map(PartitionSplit::position))
            .await?;
        Ok(finished)
    }

    /// Close the reader and its coordinator
    pub async fn close(&mut self) {
        self.splits.clear();
        self.coordinator.close().await;
    }
}
