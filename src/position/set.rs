//! Highest-offset-wins position set

use super::types::PartitionPosition;
use crate::types::{Offset, PartitionId};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Outcome of inserting a position into a [`PositionSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    /// First position seen for the partition
    Inserted,
    /// Replaced an older position for the partition
    Replaced,
    /// Discarded because an equal or newer position was already held
    Ignored,
}

impl Merge {
    /// Whether a position was dropped (either the old or the incoming one)
    pub fn superseded(self) -> bool {
        !matches!(self, Merge::Inserted)
    }
}

/// Set of positions holding at most one offset per partition
///
/// Iteration is in partition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionSet {
    positions: BTreeMap<PartitionId, Offset>,
}

impl PositionSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a position, keeping the highest offset per partition
    pub fn insert(&mut self, position: PartitionPosition) -> Merge {
        match self.positions.entry(position.partition) {
            Entry::Vacant(entry) => {
                entry.insert(position.offset);
                Merge::Inserted
            }
            Entry::Occupied(mut entry) if position.offset > *entry.get() => {
                entry.insert(position.offset);
                Merge::Replaced
            }
            Entry::Occupied(_) => Merge::Ignored,
        }
    }

    /// Insert every position, returning how many were superseded
    pub fn extend<I>(&mut self, positions: I) -> usize
    where
        I: IntoIterator<Item = PartitionPosition>,
    {
        let mut superseded = 0;
        for position in positions {
            if self.insert(position).superseded() {
                superseded += 1;
            }
        }
        superseded
    }

    /// Offset held for a partition
    pub fn get(&self, partition: &PartitionId) -> Option<Offset> {
        self.positions.get(partition).copied()
    }

    /// Remove a partition, returning its offset
    pub fn remove(&mut self, partition: &PartitionId) -> Option<Offset> {
        self.positions.remove(partition)
    }

    /// Number of partitions held
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Remove and return all positions, leaving the set empty
    pub fn take(&mut self) -> PositionSet {
        std::mem::take(self)
    }

    /// Iterate positions in partition order
    pub fn iter(&self) -> impl Iterator<Item = PartitionPosition> + '_ {
        self.positions
            .iter()
            .map(|(partition, offset)| PartitionPosition::new(partition.clone(), *offset))
    }

    /// Positions in partition order
    pub fn to_vec(&self) -> Vec<PartitionPosition> {
        self.iter().collect()
    }
}

impl IntoIterator for PositionSet {
    type Item = PartitionPosition;
    type IntoIter = std::iter::Map<
        std::collections::btree_map::IntoIter<PartitionId, Offset>,
        fn((PartitionId, Offset)) -> PartitionPosition,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.into_iter().map(to_position as fn(_) -> _)
    }
}

fn to_position((partition, offset): (PartitionId, Offset)) -> PartitionPosition {
    PartitionPosition { partition, offset }
}

impl FromIterator<PartitionPosition> for PositionSet {
    fn from_iter<I: IntoIterator<Item = PartitionPosition>>(iter: I) -> Self {
        let mut set = PositionSet::new();
        set.extend(iter);
        set
    }
}
