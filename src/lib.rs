// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # checkpoint-cursor
//!
//! Checkpoint-synchronized cursor commits for partitioned streaming sources.
//!
//! A partition's read cursor is acknowledged upstream only after the pipeline
//! confirms that the checkpoint which captured it is durable. Committing
//! earlier would skip records on restart; never committing would leave an
//! unbounded backlog upstream.
//!
//! ## Features
//!
//! - **Deferred Commits**: Snapshots are held per checkpoint id until completion
//! - **Coalesced Completions**: One notice commits every checkpoint at or below it
//! - **Highest Offset Wins**: Only the newest cursor per partition is committed
//! - **Finished Partitions**: Terminal cursors ride along with the next completion
//! - **Pluggable Committers**: Log, in-memory, or JSON cursor file
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkpoint_cursor::{CheckpointCursorCoordinator, LogCommitter, PartitionPosition, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let coordinator = CheckpointCursorCoordinator::new(LogCommitter::new());
//!
//!     // Checkpoint 1 snapshot taken
//!     coordinator
//!         .add_checkpoint(1, vec![PartitionPosition::new("orders/0", 10)])
//!         .await?;
//!
//!     // Partition 1 drained for good
//!     coordinator
//!         .notify_split_finished(vec![PartitionPosition::new("orders/1", 99)])
//!         .await?;
//!
//!     // Pipeline persisted checkpoint 1: commits orders/0@10 and orders/1@99
//!     coordinator.notify_checkpoint_complete(1).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        SourceReader                          │
//! │  snapshot_state()   notify_checkpoint_complete()   finish()  │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────┴───────────────────────────────┐
//! │                 CheckpointCursorCoordinator                  │
//! │     checkpoint registry  ·  pending finished  ·  merge       │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//!              ┌─────────────────┼─────────────────┐
//!              │                 │                 │
//!         LogCommitter    MemoryCommitter    FileCommitter
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and identifiers
pub mod types;

/// Partition positions and the ordering rule
pub mod position;

/// Upstream cursor committers
pub mod commit;

/// Checkpoint cursor coordination
pub mod coordinator;

/// Checkpoint-aware source reader
pub mod reader;

/// Configuration loading
pub mod config;

/// Event script replay
pub mod replay;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use commit::{FileCommitter, LogCommitter, MemoryCommitter, PartitionCommitter};
pub use coordinator::{CheckpointCursorCoordinator, CommitReport, CoordinatorStats};
pub use position::{PartitionPosition, PositionSet};
pub use reader::{PartitionSplit, SourceReader};
