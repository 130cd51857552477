//! Tests for reader module

use super::*;
use crate::commit::MemoryCommitter;
use crate::coordinator::CheckpointCursorCoordinator;
use crate::error::Error;
use crate::position::PartitionPosition;
use crate::types::{Offset, PartitionId};

const SUBSCRIPTION: &str = "projects/demo/locations/us-central1-a/subscriptions/orders";

fn reader() -> (SourceReader, MemoryCommitter) {
    let committer = MemoryCommitter::new();
    let coordinator = CheckpointCursorCoordinator::new(committer.clone());
    (SourceReader::new(coordinator), committer)
}

fn id(partition: u64) -> PartitionId {
    PartitionId::of(SUBSCRIPTION, partition)
}

// ============================================================================
// Split Tests
// ============================================================================

#[test]
fn test_split_position() {
    let split = PartitionSplit::new(SUBSCRIPTION, 2, 40);
    assert_eq!(split.id(), id(2));
    assert_eq!(split.position(), PartitionPosition::new(id(2), 40));
}

#[test]
fn test_split_state_never_moves_backwards() {
    let mut state = SplitState::new(PartitionSplit::new(SUBSCRIPTION, 0, 10));
    assert_eq!(state.current(), Offset::new(10));

    state.record_emitted(Offset::new(14));
    assert_eq!(state.current(), Offset::new(15));

    state.record_emitted(Offset::new(3));
    assert_eq!(state.current(), Offset::new(15));
    assert_eq!(state.to_split().start, Offset::new(15));
}

#[test]
fn test_split_deserialize_default_start() {
    let split: PartitionSplit =
        serde_json::from_str(r#"{"subscription": "subs", "partition": 1}"#).unwrap();
    assert_eq!(split.start, Offset::new(0));
}

// ============================================================================
// Reader Tests
// ============================================================================

#[test]
fn test_record_emitted_unknown_split() {
    let (mut reader, _) = reader();
    let err = reader.record_emitted(&id(9), Offset::new(1)).unwrap_err();
    assert!(matches!(err, Error::UnknownSplit { .. }));
}

#[test]
fn test_add_splits_keeps_existing_progress() {
    let (mut reader, _) = reader();
    reader.add_splits(vec![PartitionSplit::new(SUBSCRIPTION, 0, 0)]);
    reader.record_emitted(&id(0), Offset::new(9)).unwrap();

    reader.add_splits(vec![PartitionSplit::new(SUBSCRIPTION, 0, 0)]);
    assert_eq!(reader.current_offset(&id(0)), Some(Offset::new(10)));
}

#[tokio::test]
async fn test_snapshot_then_complete_commits_cursors() {
    let (mut reader, committer) = reader();
    reader.add_splits(vec![
        PartitionSplit::new(SUBSCRIPTION, 0, 0),
        PartitionSplit::new(SUBSCRIPTION, 1, 100),
    ]);
    reader.record_emitted(&id(0), Offset::new(4)).unwrap();

    let snapshot = reader.snapshot_state(1).await.unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].start, Offset::new(5));
    // Nothing committed until the checkpoint completes
    assert!(committer.commits().await.is_empty());

    // Progress after the snapshot is not part of checkpoint 1
    reader.record_emitted(&id(0), Offset::new(20)).unwrap();
    reader.notify_checkpoint_complete(1).await.unwrap();

    assert_eq!(
        committer.commits().await,
        vec![
            PartitionPosition::new(id(0), 5),
            PartitionPosition::new(id(1), 100),
        ]
    );
}

#[tokio::test]
async fn test_finished_split_committed_with_next_checkpoint() {
    let (mut reader, committer) = reader();
    reader.add_splits(vec![
        PartitionSplit::new(SUBSCRIPTION, 0, 0),
        PartitionSplit::new(SUBSCRIPTION, 1, 0),
    ]);
    reader.record_emitted(&id(1), Offset::new(98)).unwrap();

    let finished = reader.finish_splits(&[id(1)]).await.unwrap();
    assert_eq!(finished[0].start, Offset::new(99));
    assert_eq!(reader.active_splits().len(), 1);

    let snapshot = reader.snapshot_state(7).await.unwrap();
    // A finished split no longer appears in snapshots
    assert_eq!(snapshot.len(), 1);

    reader.notify_checkpoint_complete(7).await.unwrap();
    assert_eq!(
        committer.commits().await,
        vec![
            PartitionPosition::new(id(0), 0),
            PartitionPosition::new(id(1), 99),
        ]
    );
}

#[tokio::test]
async fn test_finish_unknown_split_retires_nothing() {
    let (mut reader, _) = reader();
    reader.add_splits(vec![PartitionSplit::new(SUBSCRIPTION, 0, 0)]);

    let err = reader.finish_splits(&[id(0), id(5)]).await.unwrap_err();
    assert!(matches!(err, Error::UnknownSplit { .. }));
    assert_eq!(reader.active_splits().len(), 1);
}

#[tokio::test]
async fn test_duplicate_snapshot_id_fails() {
    let (mut reader, _) = reader();
    reader.add_splits(vec![PartitionSplit::new(SUBSCRIPTION, 0, 0)]);

    reader.snapshot_state(3).await.unwrap();
    let err = reader.snapshot_state(3).await.unwrap_err();
    assert!(matches!(err, Error::DuplicateCheckpoint { checkpoint_id: 3 }));
}

#[tokio::test]
async fn test_close_leaves_pending_uncommitted() {
    let (mut reader, committer) = reader();
    reader.add_splits(vec![PartitionSplit::new(SUBSCRIPTION, 0, 0)]);
    reader.snapshot_state(1).await.unwrap();

    reader.close().await;

    assert!(reader.active_splits().is_empty());
    assert!(reader.coordinator().is_closed().await);
    assert!(committer.commits().await.is_empty());
}
