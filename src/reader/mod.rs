//! Source reader module
//!
//! Drives the coordinator from the reader's checkpoint-handling path.
//!
//! # Overview
//!
//! The reader module provides:
//! - `PartitionSplit` - A subscription partition assigned to this reader
//! - `SplitState` - Mutable read progress of an assigned split
//! - `SourceReader` - Tracks split cursors and forwards snapshot, completion
//!   and split-finished events to the coordinator
//!
//! Fetching records and assigning splits happen elsewhere; the reader is
//! told which splits it owns and which offsets have been emitted.

mod source;
mod split;

pub use source::SourceReader;
pub use split::{PartitionSplit, SplitState};

#[cfg(test)]
mod tests;
