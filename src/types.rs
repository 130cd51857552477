//! Common types used throughout checkpoint-cursor
//!
//! This module contains the identifiers shared by the coordinator,
//! the committers and the source reader.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Checkpoint identifier assigned by the pipeline (strictly increasing)
pub type CheckpointId = u64;

// ============================================================================
// Partition Identifier
// ============================================================================

/// Stable identifier of a partition
///
/// Ordered so commit batches are issued in a deterministic partition order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionId(String);

impl PartitionId {
    /// Create a partition id from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier of partition `partition` of `subscription`
    pub fn of(subscription: &str, partition: u64) -> Self {
        Self(format!("{}/{partition}", subscription.trim_end_matches('/')))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PartitionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PartitionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ============================================================================
// Offset
// ============================================================================

/// Read cursor within a partition
///
/// Holds the offset of the next record to read, which is what upstream
/// expects to receive on commit.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Offset(i64);

impl Offset {
    /// Create an offset
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw offset value
    pub const fn value(self) -> i64 {
        self.0
    }

    /// The offset following this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Offset {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_id_of() {
        let id = PartitionId::of("projects/p/locations/l/subscriptions/s", 3);
        assert_eq!(id.as_str(), "projects/p/locations/l/subscriptions/s/3");

        let id = PartitionId::of("subs/", 0);
        assert_eq!(id.to_string(), "subs/0");
    }

    #[test]
    fn test_partition_id_ordering() {
        let mut ids = vec![PartitionId::new("b"), PartitionId::new("a")];
        ids.sort();
        assert_eq!(ids[0].as_str(), "a");
    }

    #[test]
    fn test_offset_next() {
        assert_eq!(Offset::new(41).next(), Offset::new(42));
        assert_eq!(Offset::new(i64::MAX).next(), Offset::new(i64::MAX));
        assert!(Offset::new(1) < Offset::new(2));
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&(PartitionId::new("p1"), Offset::new(7))).unwrap();
        assert_eq!(json, r#"["p1",7]"#);
    }
}
