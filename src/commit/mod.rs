//! Cursor commit module
//!
//! Performs the upstream acknowledgment of a single partition's position.
//!
//! # Overview
//!
//! The commit module provides:
//! - `PartitionCommitter` - Trait implemented by every commit mechanism
//! - `LogCommitter` - Acknowledges by emitting a tracing event
//! - `MemoryCommitter` - Records calls in order (tests, dry runs)
//! - `FileCommitter` - Persists committed cursors to a JSON cursor file
//!
//! Committers are called by the coordinator one partition at a time and in
//! order, so a committer never needs to dedupe or reorder calls itself.

mod file;
mod log;
mod memory;

pub use file::{CommittedCursor, CursorFile, FileCommitter};
pub use log::LogCommitter;
pub use memory::MemoryCommitter;

use crate::error::Result;
use crate::types::{Offset, PartitionId};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for upstream cursor commit mechanisms
#[async_trait]
pub trait PartitionCommitter: Send + Sync {
    /// Acknowledge `offset` as the read cursor of `partition`
    async fn commit(&self, partition: &PartitionId, offset: Offset) -> Result<()>;

    /// Short name used in log output
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: PartitionCommitter + ?Sized> PartitionCommitter for Arc<T> {
    async fn commit(&self, partition: &PartitionId, offset: Offset) -> Result<()> {
        (**self).commit(partition, offset).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
