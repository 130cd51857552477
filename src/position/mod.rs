//! Partition position module
//!
//! Read-position snapshots and the highest-offset-wins merge rule.
//!
//! # Overview
//!
//! The position module provides:
//! - `PartitionPosition` - Immutable snapshot of one partition's read cursor
//! - `PositionSet` - Per-partition dedupe that keeps only the highest offset
//!
//! Only the newest position of a partition is ever committed upstream. Older
//! positions are a prefix of progress already covered by the newer one.

mod set;
mod types;

pub use set::{Merge, PositionSet};
pub use types::PartitionPosition;
