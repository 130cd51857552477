//! Checkpoint cursor coordinator implementation

use super::registry::CheckpointRegistry;
use super::types::{CommitReport, CoordinatorStats};
use crate::commit::PartitionCommitter;
use crate::error::{CommitFailure, Error, Result};
use crate::position::{PartitionPosition, PositionSet};
use crate::types::{CheckpointId, Offset, PartitionId};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct CoordinatorState {
    /// Snapshots of checkpoints not yet completed
    registry: CheckpointRegistry,
    /// Terminal positions of finished partitions, plus failed commits carried forward
    pending: PositionSet,
    /// Highest offset successfully committed per partition
    committed: PositionSet,
    /// Finished partitions whose committed entry is still held
    retired: BTreeSet<PartitionId>,
    /// Highest checkpoint id named in a completion notice
    last_completed: Option<CheckpointId>,
    stats: CoordinatorStats,
    closed: bool,
}

impl CoordinatorState {
    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::CoordinatorClosed);
        }
        Ok(())
    }

    fn already_committed(&self, position: &PartitionPosition) -> bool {
        self.committed
            .get(&position.partition)
            .is_some_and(|done| position.offset <= done)
    }

    /// Forget committed offsets of finished partitions nothing can commit again
    ///
    /// A retired partition stays tracked while a pending position or a
    /// registered snapshot still names it.
    fn evict_retired(&mut self) -> usize {
        let Self {
            registry,
            pending,
            committed,
            retired,
            ..
        } = self;

        let before = retired.len();
        retired.retain(|partition| {
            let settled = pending.get(partition).is_none() && !registry.references(partition);
            if settled {
                committed.remove(partition);
            }
            !settled
        });
        before - retired.len()
    }
}

/// Commits partition cursors once the checkpoint that captured them completes
///
/// Clones share the same state and committer.
pub struct CheckpointCursorCoordinator {
    committer: Arc<dyn PartitionCommitter>,
    state: Arc<Mutex<CoordinatorState>>,
}

impl CheckpointCursorCoordinator {
    /// Create a coordinator that commits through `committer`
    pub fn new<C>(committer: C) -> Self
    where
        C: PartitionCommitter + 'static,
    {
        Self::with_shared(Arc::new(committer))
    }

    /// Create a coordinator from an already shared committer
    pub fn with_shared(committer: Arc<dyn PartitionCommitter>) -> Self {
        Self {
            committer,
            state: Arc::new(Mutex::new(CoordinatorState::default())),
        }
    }

    /// Register the position snapshot taken for `checkpoint_id`
    ///
    /// Nothing is committed until the checkpoint completes.
    pub async fn add_checkpoint(
        &self,
        checkpoint_id: CheckpointId,
        positions: Vec<PartitionPosition>,
    ) -> Result<()> {
        let mut state = self.state.lock().await;
        state.ensure_open()?;

        if state.last_completed.is_some_and(|last| checkpoint_id <= last) {
            warn!(
                checkpoint_id,
                last_completed = ?state.last_completed,
                "Checkpoint registered at or below an already completed id"
            );
        }

        let count = positions.len();
        state.registry.register(checkpoint_id, positions)?;
        state.stats.add_registered();

        debug!(checkpoint_id, partitions = count, "Registered checkpoint snapshot");
        Ok(())
    }

    /// Commit every snapshot with id ≤ `checkpoint_id` plus pending finished positions
    ///
    /// Only the highest offset per partition is committed. A notice with nothing
    /// pending is a no-op. If any commit fails, the remaining partitions are still
    /// attempted, successful ones stay committed, failed positions are kept pending
    /// for the next completion and [`Error::CommitFailed`] is returned.
    pub async fn notify_checkpoint_complete(
        &self,
        checkpoint_id: CheckpointId,
    ) -> Result<CommitReport> {
        let mut state = self.state.lock().await;
        state.ensure_open()?;

        state.last_completed = Some(
            state
                .last_completed
                .map_or(checkpoint_id, |last| last.max(checkpoint_id)),
        );

        let snapshots = state.registry.drain_through(checkpoint_id);
        let mut report = CommitReport::new(checkpoint_id);

        if snapshots.is_empty() && state.pending.is_empty() {
            debug!(checkpoint_id, "No pending cursors for completed checkpoint");
            return Ok(report);
        }

        let mut batch = state.pending.take();
        report.checkpoints = snapshots.keys().copied().collect();
        for positions in snapshots.into_values() {
            report.superseded += batch.extend(positions);
        }
        let completed = report.checkpoints.len();
        state.stats.add_completed(completed);
        state.stats.add_superseded(report.superseded);

        let mut failures = Vec::new();
        for position in batch {
            if state.already_committed(&position) {
                report.skipped += 1;
                continue;
            }

            match self
                .committer
                .commit(&position.partition, position.offset)
                .await
            {
                Ok(()) => {
                    state.committed.insert(position.clone());
                    state.stats.add_commit();
                    report.committed.push(position);
                }
                Err(e) => {
                    warn!(
                        checkpoint_id,
                        partition = %position.partition,
                        offset = %position.offset,
                        committer = self.committer.name(),
                        error = %e,
                        "Cursor commit failed"
                    );
                    state.stats.add_failure();
                    failures.push(CommitFailure {
                        partition: position.partition,
                        offset: position.offset,
                        message: e.to_string(),
                    });
                }
            }
        }

        for failure in &failures {
            state.pending.insert(PartitionPosition::new(
                failure.partition.clone(),
                failure.offset,
            ));
        }

        let evicted = state.evict_retired();
        if evicted > 0 {
            debug!(checkpoint_id, partitions = evicted, "Evicted finished partitions");
        }

        info!(
            checkpoint_id,
            checkpoints = completed,
            committed = report.committed.len(),
            superseded = report.superseded,
            failed = failures.len(),
            "Committed cursors for completed checkpoint"
        );

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(Error::CommitFailed {
                checkpoint_id,
                failures,
            })
        }
    }

    /// Record terminal positions of partitions that will not appear in later snapshots
    ///
    /// They are committed with the next checkpoint completion.
    pub async fn notify_split_finished<I>(&self, positions: I) -> Result<()>
    where
        I: IntoIterator<Item = PartitionPosition>,
    {
        let mut state = self.state.lock().await;
        state.ensure_open()?;

        for position in positions {
            debug!(
                partition = %position.partition,
                offset = %position.offset,
                "Recorded finished partition"
            );
            state.stats.add_finished();
            state.retired.insert(position.partition.clone());
            if state.pending.insert(position).superseded() {
                state.stats.add_superseded(1);
            }
        }
        Ok(())
    }

    /// Tear down, leaving still-registered checkpoints uncommitted
    ///
    /// Every later operation fails with [`Error::CoordinatorClosed`].
    pub async fn close(&self) {
        let mut state = self.state.lock().await;
        if state.closed {
            return;
        }

        let discarded = state.registry.clear();
        let dropped = state.pending.take().len();
        state.retired.clear();
        state.stats.add_discarded(discarded);
        state.closed = true;

        if discarded > 0 || dropped > 0 {
            warn!(
                checkpoints = discarded,
                finished = dropped,
                "Closing coordinator with uncommitted cursors"
            );
        } else {
            debug!("Closed coordinator");
        }
    }

    /// Checkpoint ids still awaiting completion, ascending
    pub async fn pending_checkpoints(&self) -> Vec<CheckpointId> {
        self.state.lock().await.registry.ids()
    }

    /// Positions waiting for the next completion, in partition order
    pub async fn pending_finished(&self) -> Vec<PartitionPosition> {
        self.state.lock().await.pending.to_vec()
    }

    /// Highest offset committed for a partition
    ///
    /// Returns `None` once a finished partition's terminal position has been
    /// committed and no registered snapshot still holds it.
    pub async fn committed_offset(&self, partition: &PartitionId) -> Option<Offset> {
        self.state.lock().await.committed.get(partition)
    }

    /// Highest checkpoint id named in a completion notice
    pub async fn last_completed(&self) -> Option<CheckpointId> {
        self.state.lock().await.last_completed
    }

    /// Snapshot of the coordinator counters
    pub async fn stats(&self) -> CoordinatorStats {
        self.state.lock().await.stats.clone()
    }

    /// Whether [`Self::close`] has been called
    pub async fn is_closed(&self) -> bool {
        self.state.lock().await.closed
    }
}

impl Clone for CheckpointCursorCoordinator {
    fn clone(&self) -> Self {
        Self {
            committer: Arc::clone(&self.committer),
            state: Arc::clone(&self.state),
        }
    }
}

impl fmt::Debug for CheckpointCursorCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckpointCursorCoordinator")
            .field("committer", &self.committer.name())
            .finish_non_exhaustive()
    }
}
