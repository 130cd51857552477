//! Logging committer

use super::PartitionCommitter;
use crate::error::Result;
use crate::types::{Offset, PartitionId};
use async_trait::async_trait;
use tracing::info;

/// Committer that only logs each acknowledgment
#[derive(Debug, Clone, Default)]
pub struct LogCommitter;

impl LogCommitter {
    /// Create a new log committer
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PartitionCommitter for LogCommitter {
    async fn commit(&self, partition: &PartitionId, offset: Offset) -> Result<()> {
        info!(partition = %partition, offset = %offset, "Committed cursor");
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}
