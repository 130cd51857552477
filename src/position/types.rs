//! Position types

use crate::types::{Offset, PartitionId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Read progress of a single partition at a point in time
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartitionPosition {
    /// Partition identifier
    pub partition: PartitionId,
    /// Offset of the next record to read
    pub offset: Offset,
}

impl PartitionPosition {
    /// Create a new position
    pub fn new(partition: impl Into<PartitionId>, offset: impl Into<Offset>) -> Self {
        Self {
            partition: partition.into(),
            offset: offset.into(),
        }
    }
}

impl fmt::Display for PartitionPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.partition, self.offset)
    }
}
