//! Contract checks for replay scripts

use super::script::{ReplayEvent, ReplayScript};
use crate::types::{CheckpointId, PartitionId};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// A caller contract violation found in a script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Index of the offending event
    pub index: usize,
    /// What is wrong
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "event {}: {}", self.index, self.message)
    }
}

/// Check a script against the reader's calling contract
///
/// Checkpoint ids must strictly increase, completions must name an id at or
/// below a registered one, emits and finishes must reference assigned splits,
/// and every partition may finish at most once.
pub fn validate_script(script: &ReplayScript, default_subscription: &str) -> Vec<Violation> {
    let subscription = script.subscription_or(default_subscription);
    let mut violations = Vec::new();
    let mut last_checkpoint: Option<CheckpointId> = None;
    let mut assigned: HashSet<PartitionId> = HashSet::new();
    let mut finished: HashSet<PartitionId> = HashSet::new();

    let mut flag = |index: usize, message: String| violations.push(Violation { index, message });

    for (index, event) in script.events.iter().enumerate() {
        match event {
            ReplayEvent::AddSplits(specs) => {
                for spec in specs {
                    let id = spec.to_split(subscription).id();
                    if finished.contains(&id) {
                        flag(index, format!("split '{id}' reassigned after it finished"));
                    }
                    assigned.insert(id);
                }
            }
            ReplayEvent::Emit(emit) => {
                let id = emit.partition_id(subscription);
                if !assigned.contains(&id) {
                    flag(index, format!("emit on unassigned split '{id}'"));
                }
            }
            ReplayEvent::Checkpoint(checkpoint_id) => {
                if let Some(last) = last_checkpoint {
                    if *checkpoint_id <= last {
                        flag(
                            index,
                            format!("checkpoint {checkpoint_id} does not increase past {last}"),
                        );
                    }
                }
                last_checkpoint = Some(last_checkpoint.map_or(*checkpoint_id, |l| l.max(*checkpoint_id)));
            }
            ReplayEvent::Complete(checkpoint_id) => {
                if last_checkpoint.map_or(true, |last| *checkpoint_id > last) {
                    flag(
                        index,
                        format!("completion of {checkpoint_id} precedes its snapshot"),
                    );
                }
            }
            ReplayEvent::Finish(partitions) => {
                for split in partitions {
                    let id = split.partition_id(subscription);
                    if !finished.insert(id.clone()) {
                        flag(index, format!("split '{id}' finished more than once"));
                    } else if !assigned.remove(&id) {
                        flag(index, format!("finish of unassigned split '{id}'"));
                    }
                }
            }
        }
    }

    violations
}
