//! Checkpoint data structures

use crate::id::{ActionId, JournalId};
use retrace_core::Node;

/// A snapshot of one participant taken on behalf of a user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    /// Action this checkpoint belongs to
    pub action: ActionId,
    /// Participant the snapshot was taken from
    pub target: JournalId,
    /// Saved state, as produced by `Journalled::save_state`
    pub snapshot: Node,
}

impl Checkpoint {
    pub fn new(action: ActionId, target: JournalId, snapshot: Node) -> Self {
        Self {
            action,
            target,
            snapshot,
        }
    }
}
