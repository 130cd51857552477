//! Integration tests for checkpoint-synchronized cursor commits
//!
//! Tests the full flow: reader events → coordinator → file-backed cursors

use checkpoint_cursor::commit::{FileCommitter, MemoryCommitter};
use checkpoint_cursor::config::load_config_from_str;
use checkpoint_cursor::replay::{load_script_from_str, replay};
use checkpoint_cursor::{
    CheckpointCursorCoordinator, Error, Offset, PartitionId, PartitionPosition, PartitionSplit,
    SourceReader,
};
use std::sync::Arc;
use tempfile::tempdir;

const SUBSCRIPTION: &str = "projects/demo/locations/us-central1-a/subscriptions/orders";

fn id(partition: u64) -> PartitionId {
    PartitionId::of(SUBSCRIPTION, partition)
}

// ============================================================================
// File-Backed Flow
// ============================================================================

#[tokio::test]
async fn test_cursor_file_reflects_completed_checkpoints_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cursors.json");
    let committer = FileCommitter::open(&path).unwrap();

    let mut reader = SourceReader::new(CheckpointCursorCoordinator::new(committer.clone()));
    reader.add_splits(vec![
        PartitionSplit::new(SUBSCRIPTION, 0, 0),
        PartitionSplit::new(SUBSCRIPTION, 1, 0),
    ]);

    reader.record_emitted(&id(0), Offset::new(49)).unwrap();
    reader.record_emitted(&id(1), Offset::new(9)).unwrap();
    reader.snapshot_state(1).await.unwrap();

    reader.record_emitted(&id(0), Offset::new(99)).unwrap();
    reader.snapshot_state(2).await.unwrap();

    // Checkpoint 1 durable; checkpoint 2 still in flight
    reader.notify_checkpoint_complete(1).await.unwrap();
    let file = FileCommitter::read(&path).unwrap();
    assert_eq!(file.offset(&id(0)), Some(Offset::new(50)));
    assert_eq!(file.offset(&id(1)), Some(Offset::new(10)));

    // Unclean shutdown: checkpoint 2 is never committed
    reader.close().await;
    let file = FileCommitter::read(&path).unwrap();
    assert_eq!(file.offset(&id(0)), Some(Offset::new(50)));

    // Restart resumes from the committed prefix
    let restarted = FileCommitter::open(&path).unwrap();
    assert_eq!(restarted.committed_offset(&id(0)).await, Some(Offset::new(50)));
}

#[tokio::test]
async fn test_replay_from_config_to_cursor_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("cursors.json");
    let config = load_config_from_str(&format!(
        "committer:\n  type: file\n  path: {}\nsubscription: {SUBSCRIPTION}\n",
        path.display()
    ))
    .unwrap();

    let script = load_script_from_str(
        r"
events:
  - add_splits: [{ partition: 0 }, { partition: 1 }, { partition: 2 }]
  - emit: { partition: 2, offset: 4 }
  - finish: [{ partition: 2 }]
  - emit: { partition: 0, offset: 100 }
  - checkpoint: 3
  - emit: { partition: 0, offset: 150 }
  - checkpoint: 5
  - complete: 5
",
    )
    .unwrap();

    let committer = config.committer.build().unwrap();
    let mut reader = SourceReader::new(CheckpointCursorCoordinator::with_shared(committer));
    let report = replay(&mut reader, &script, &config.subscription, true)
        .await
        .unwrap();

    assert_eq!(report.completions.len(), 1);
    assert_eq!(report.completions[0].checkpoints, vec![3, 5]);

    let file = FileCommitter::read(&path).unwrap();
    assert_eq!(file.offset(&id(0)), Some(Offset::new(151)));
    assert_eq!(file.offset(&id(1)), Some(Offset::new(0)));
    assert_eq!(file.offset(&id(2)), Some(Offset::new(5)));
}

// ============================================================================
// Protocol Properties
// ============================================================================

#[tokio::test]
async fn test_union_of_pending_checkpoints_is_committed_once() {
    let committer = MemoryCommitter::new();
    let coordinator = CheckpointCursorCoordinator::new(committer.clone());

    for checkpoint_id in 1..=10u64 {
        let positions = (0..4)
            .map(|p| PartitionPosition::new(format!("p{p}"), (checkpoint_id * 10 + p) as i64))
            .collect();
        coordinator
            .add_checkpoint(checkpoint_id, positions)
            .await
            .unwrap();
    }

    coordinator.notify_checkpoint_complete(6).await.unwrap();
    coordinator.notify_checkpoint_complete(6).await.unwrap();

    let commits = committer.commits().await;
    assert_eq!(commits.len(), 4);
    for (p, commit) in commits.iter().enumerate() {
        assert_eq!(commit.offset, Offset::new(60 + p as i64));
    }
    assert_eq!(
        coordinator.pending_checkpoints().await,
        vec![7, 8, 9, 10]
    );
}

#[tokio::test]
async fn test_shared_committer_across_coordinators() {
    let committer = Arc::new(MemoryCommitter::new());
    let first = CheckpointCursorCoordinator::with_shared(committer.clone());
    let second = CheckpointCursorCoordinator::with_shared(committer.clone());

    first
        .add_checkpoint(1, vec![PartitionPosition::new("a", 1)])
        .await
        .unwrap();
    second
        .add_checkpoint(1, vec![PartitionPosition::new("b", 2)])
        .await
        .unwrap();

    first.notify_checkpoint_complete(1).await.unwrap();
    second.notify_checkpoint_complete(1).await.unwrap();

    assert_eq!(committer.commits().await.len(), 2);
}

#[tokio::test]
async fn test_closed_reader_rejects_snapshots() {
    let mut reader = SourceReader::new(CheckpointCursorCoordinator::new(MemoryCommitter::new()));
    reader.close().await;

    let err = reader.snapshot_state(1).await.unwrap_err();
    assert!(matches!(err, Error::CoordinatorClosed));
}
