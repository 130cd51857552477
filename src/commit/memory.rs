//! In-memory recording committer

use super::PartitionCommitter;
use crate::error::{Error, Result};
use crate::position::PartitionPosition;
use crate::types::{Offset, PartitionId};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct Recorded {
    commits: Vec<PartitionPosition>,
    failing: HashSet<PartitionId>,
}

/// Committer that records every call in order
///
/// Clones share the same record, so a test can keep one handle while the
/// coordinator owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryCommitter {
    inner: Arc<Mutex<Recorded>>,
}

impl MemoryCommitter {
    /// Create a new memory committer
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every commit for `partition` fail until [`Self::recover`] is called
    pub async fn fail_partition(&self, partition: impl Into<PartitionId>) {
        self.inner.lock().await.failing.insert(partition.into());
    }

    /// Let commits for `partition` succeed again
    pub async fn recover(&self, partition: &PartitionId) {
        self.inner.lock().await.failing.remove(partition);
    }

    /// All successful commits, in call order
    pub async fn commits(&self) -> Vec<PartitionPosition> {
        self.inner.lock().await.commits.clone()
    }

    /// Last committed offset for a partition
    pub async fn committed_offset(&self, partition: &PartitionId) -> Option<Offset> {
        self.inner
            .lock()
            .await
            .commits
            .iter()
            .rev()
            .find(|p| &p.partition == partition)
            .map(|p| p.offset)
    }

    /// Forget recorded commits
    pub async fn clear(&self) {
        self.inner.lock().await.commits.clear();
    }
}

#[async_trait]
impl PartitionCommitter for MemoryCommitter {
    async fn commit(&self, partition: &PartitionId, offset: Offset) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.failing.contains(partition) {
            return Err(Error::commit(partition.clone(), "injected failure"));
        }
        inner
            .commits
            .push(PartitionPosition::new(partition.clone(), offset));
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
