//! Checkpoint cursor coordination module
//!
//! Defers cursor commits until the checkpoint that captured them is durable.
//!
//! # Overview
//!
//! The coordinator module provides:
//! - `CheckpointCursorCoordinator` - Registry of in-flight checkpoint snapshots
//!   and pending finished-partition positions, driving commits on completion
//! - `CheckpointRegistry` - Ordered checkpoint id → snapshot store
//! - `CommitReport` / `CoordinatorStats` - What a completion committed
//!
//! # Protocol
//!
//! ```text
//!  snapshot(cp)           complete(cp)                 split finished
//!       │                      │                             │
//!       ▼                      ▼                             ▼
//!  registry[cp] ──► drain ids ≤ cp ──► merge ◄── pending finished set
//!                                        │
//!                          highest offset per partition
//!                                        │
//!                                        ▼
//!                              PartitionCommitter
//! ```
//!
//! All operations are serialized through one async mutex which stays held
//! across the commit calls of a batch, so commits of the same partition are
//! never reordered.

mod protocol;
mod registry;
mod types;

pub use protocol::CheckpointCursorCoordinator;
pub use registry::CheckpointRegistry;
pub use types::{CommitReport, CoordinatorStats};
