//! Replay runner

use super::script::{ReplayEvent, ReplayScript};
use crate::coordinator::{CommitReport, CoordinatorStats};
use crate::error::{Error, Result};
use crate::reader::SourceReader;
use crate::types::{CheckpointId, PartitionId};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, warn};

/// Outcome of a replay
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReplayReport {
    /// Reports of successful checkpoint completions, in order
    pub completions: Vec<CommitReport>,
    /// Messages of completions whose commits failed
    pub failures: Vec<String>,
    /// Checkpoints still registered when the script ended
    pub pending_checkpoints: Vec<CheckpointId>,
    /// Coordinator counters at the end of the script
    pub stats: CoordinatorStats,
    /// Events applied
    pub events: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Apply every event of `script` to `reader`
///
/// A failed checkpoint completion is recorded and replay continues unless
/// `fail_on_commit_error` is set, in which case the error is returned.
/// Contract violations (duplicate checkpoint ids, unknown splits) always
/// abort the replay.
pub async fn replay(
    reader: &mut SourceReader,
    script: &ReplayScript,
    default_subscription: &str,
    fail_on_commit_error: bool,
) -> Result<ReplayReport> {
    let start = Instant::now();
    let subscription = script.subscription_or(default_subscription);
    let mut report = ReplayReport::default();

    for (index, event) in script.events.iter().enumerate() {
        debug!(index, event = ?event, "Applying replay event");
        match event {
            ReplayEvent::AddSplits(specs) => {
                reader.add_splits(specs.iter().map(|s| s.to_split(subscription)));
            }
            ReplayEvent::Emit(emit) => {
                reader.record_emitted(&emit.partition_id(subscription), emit.offset)?;
            }
            ReplayEvent::Checkpoint(checkpoint_id) => {
                reader.snapshot_state(*checkpoint_id).await?;
            }
            ReplayEvent::Complete(checkpoint_id) => {
                match reader.notify_checkpoint_complete(*checkpoint_id).await {
                    Ok(completion) => report.completions.push(completion),
                    Err(e @ Error::CommitFailed { .. }) if !fail_on_commit_error => {
                        warn!(checkpoint_id, error = %e, "Continuing after failed completion");
                        report.failures.push(e.to_string());
                    }
                    Err(e) => return Err(e),
                }
            }
            ReplayEvent::Finish(partitions) => {
                let ids: Vec<PartitionId> = partitions
                    .iter()
                    .map(|split| split.partition_id(subscription))
                    .collect();
                reader.finish_splits(&ids).await?;
            }
        }
        report.events += 1;
    }

    let coordinator = reader.coordinator();
    report.pending_checkpoints = coordinator.pending_checkpoints().await;
    report.stats = coordinator.stats().await;
    report.duration_ms = start.elapsed().as_millis() as u64;
    Ok(report)
}
