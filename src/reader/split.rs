//! Split types

use crate::position::PartitionPosition;
use crate::types::{Offset, PartitionId};
use serde::{Deserialize, Serialize};

/// A partition of a subscription, with the offset to resume reading from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSplit {
    /// Subscription path
    pub subscription: String,
    /// Partition number within the subscription
    pub partition: u64,
    /// Offset of the next record to read
    #[serde(default)]
    pub start: Offset,
}

impl PartitionSplit {
    /// Create a new split
    pub fn new(subscription: impl Into<String>, partition: u64, start: impl Into<Offset>) -> Self {
        Self {
            subscription: subscription.into(),
            partition,
            start: start.into(),
        }
    }

    /// Stable identifier of this split's partition
    pub fn id(&self) -> PartitionId {
        PartitionId::of(&self.subscription, self.partition)
    }

    /// Position this split resumes from
    pub fn position(&self) -> PartitionPosition {
        PartitionPosition::new(self.id(), self.start)
    }
}

/// Read progress of an assigned split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitState {
    split: PartitionSplit,
    current: Offset,
}

impl SplitState {
    /// Start tracking `split` from its start offset
    pub fn new(split: PartitionSplit) -> Self {
        let current = split.start;
        Self { split, current }
    }

    /// Offset of the next record to read
    pub fn current(&self) -> Offset {
        self.current
    }

    /// Advance past an emitted record, never moving backwards
    pub fn record_emitted(&mut self, offset: Offset) {
        self.current = self.current.max(offset.next());
    }

    /// Split carrying the current read offset
    pub fn to_split(&self) -> PartitionSplit {
        PartitionSplit {
            start: self.current,
            ..self.split.clone()
        }
    }
}
