//! Event replay module
//!
//! Drives a `SourceReader` and its coordinator through a recorded script of
//! reader events. Used by the CLI to dry-run commit behavior and to check
//! that a caller honors the checkpoint contract.
//!
//! # Script format
//!
//! ```yaml
//! subscription: projects/demo/locations/us-central1-a/subscriptions/orders
//! events:
//!   - add_splits:
//!       - { partition: 0 }
//!       - { partition: 1, start: 100 }
//!   - emit: { partition: 0, offset: 9 }
//!   - checkpoint: 1
//!   - finish: [{ partition: 1 }]
//!   - complete: 1
//! ```

mod runner;
mod script;
mod validate;

pub use runner::{replay, ReplayReport};
pub use script::{load_script, load_script_from_str, EmitEvent, ReplayEvent, ReplayScript, SplitRef, SplitSpec};
pub use validate::{validate_script, Violation};
