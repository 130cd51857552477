//! Coordinator types

use crate::position::PartitionPosition;
use crate::types::CheckpointId;
use serde::Serialize;

/// What a checkpoint completion committed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitReport {
    /// Checkpoint id named in the completion notice
    pub checkpoint_id: CheckpointId,
    /// Registered checkpoints folded into this batch, ascending
    pub checkpoints: Vec<CheckpointId>,
    /// Positions committed, in issue order
    pub committed: Vec<PartitionPosition>,
    /// Positions dropped because a newer one for the partition was present
    pub superseded: usize,
    /// Positions skipped because an equal or newer offset was already committed
    pub skipped: usize,
}

impl CommitReport {
    /// Create an empty report for `checkpoint_id`
    pub fn new(checkpoint_id: CheckpointId) -> Self {
        Self {
            checkpoint_id,
            ..Self::default()
        }
    }

    /// Whether nothing was committed
    pub fn is_empty(&self) -> bool {
        self.committed.is_empty()
    }
}

/// Counters kept by the coordinator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CoordinatorStats {
    /// Checkpoints registered
    pub checkpoints_registered: usize,
    /// Checkpoints whose snapshot was committed
    pub checkpoints_completed: usize,
    /// Checkpoints dropped uncommitted on close
    pub checkpoints_discarded: usize,
    /// Finished-partition positions recorded
    pub finished_recorded: usize,
    /// Successful commit calls
    pub commits_issued: usize,
    /// Failed commit calls
    pub commits_failed: usize,
    /// Positions dropped in favor of a newer one
    pub positions_superseded: usize,
}

impl CoordinatorStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registered checkpoint
    pub fn add_registered(&mut self) {
        self.checkpoints_registered += 1;
    }

    /// Add completed checkpoints
    pub fn add_completed(&mut self, count: usize) {
        self.checkpoints_completed += count;
    }

    /// Add discarded checkpoints
    pub fn add_discarded(&mut self, count: usize) {
        self.checkpoints_discarded += count;
    }

    /// Add a recorded finished position
    pub fn add_finished(&mut self) {
        self.finished_recorded += 1;
    }

    /// Add a successful commit
    pub fn add_commit(&mut self) {
        self.commits_issued += 1;
    }

    /// Add a failed commit
    pub fn add_failure(&mut self) {
        self.commits_failed += 1;
    }

    /// Add superseded positions
    pub fn add_superseded(&mut self, count: usize) {
        self.positions_superseded += count;
    }
}
