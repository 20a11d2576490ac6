//! Undo/redo checkpoint journal
//!
//! Checkpoints are appended in capture order. All checkpoints sharing an
//! action id form one unit: `undo` restores every participant the action
//! touched, newest capture first, and moves their current state to the redo
//! log so `redo` can replay it.

use crate::checkpoint::Checkpoint;
use crate::id::ActionId;
use crate::participant::Journalled;
use crate::registry::IdentityRegistry;
use ahash::AHashSet;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

#[derive(Default)]
struct Logs {
    /// Oldest first
    undo: VecDeque<Checkpoint>,
    /// In the order undo pushed them
    redo: VecDeque<Checkpoint>,
}

/// Which log a traversal consumes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Undo,
    Redo,
}

/// Ordered undo and redo logs for one session
pub struct CheckpointJournal {
    logs: Mutex<Logs>,
    /// Journal-wide switch; off while undo/redo restores participants
    journalling: AtomicBool,
    /// Cap on distinct actions held by the undo log
    max_undo_states: usize,
}

impl CheckpointJournal {
    /// Create an empty journal keeping at most `max_undo_states` undoable actions
    pub fn new(max_undo_states: usize) -> Self {
        Self {
            logs: Mutex::new(Logs::default()),
            journalling: AtomicBool::new(true),
            max_undo_states: max_undo_states.max(1),
        }
    }

    pub fn is_journalling(&self) -> bool {
        self.journalling.load(Ordering::SeqCst)
    }

    pub fn set_journalling(&self, enabled: bool) {
        self.journalling.store(enabled, Ordering::SeqCst);
    }

    /// Capture the current state of `participant` under `action`
    ///
    /// No-op when either the journal or the participant is not journalling.
    /// A new checkpoint discards the redo log. When the undo log then holds
    /// more than `max_undo_states` actions, whole actions are dropped,
    /// oldest first.
    pub fn add_checkpoint<P>(&self, participant: &P, action: ActionId) -> bool
    where
        P: Journalled + ?Sized,
    {
        if !self.is_journalling() || !participant.is_journalling() {
            return false;
        }
        let Some(snapshot) = participant.save_state() else {
            return false;
        };

        let mut logs = self.logs.lock();
        logs.redo.clear();
        logs.undo.push_back(Checkpoint::new(action, participant.id(), snapshot));
        self.trim_undo(&mut logs);
        true
    }

    /// Restore every participant touched by `action` to its captured state
    ///
    /// Returns the number of participants restored. Participants that no
    /// longer exist are skipped.
    pub fn undo(&self, registry: &Mutex<IdentityRegistry>, action: ActionId) -> usize {
        self.replay(registry, action, Direction::Undo)
    }

    /// Re-apply the state `undo` replaced for `action`
    pub fn redo(&self, registry: &Mutex<IdentityRegistry>, action: ActionId) -> usize {
        self.replay(registry, action, Direction::Redo)
    }

    /// Undo the most recent action; returns it with the number restored
    pub fn undo_last(&self, registry: &Mutex<IdentityRegistry>) -> Option<(ActionId, usize)> {
        let action = self.logs.lock().undo.back()?.action;
        Some((action, self.undo(registry, action)))
    }

    /// Redo the most recently undone action
    pub fn redo_last(&self, registry: &Mutex<IdentityRegistry>) -> Option<(ActionId, usize)> {
        let action = self.logs.lock().redo.back()?.action;
        Some((action, self.redo(registry, action)))
    }

    pub fn can_undo(&self) -> bool {
        !self.logs.lock().undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.logs.lock().redo.is_empty()
    }

    /// Distinct actions on the undo log, oldest first
    pub fn undo_actions(&self) -> Vec<ActionId> {
        let logs = self.logs.lock();
        let mut actions: Vec<ActionId> = Vec::new();
        for checkpoint in &logs.undo {
            if !actions.contains(&checkpoint.action) {
                actions.push(checkpoint.action);
            }
        }
        actions
    }

    /// Number of checkpoints on the undo log
    pub fn len(&self) -> usize {
        self.logs.lock().undo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of checkpoints on the redo log
    pub fn redo_len(&self) -> usize {
        self.logs.lock().redo.len()
    }

    /// Checkpoints recorded for `action` on the undo log, in capture order
    pub fn checkpoints_for(&self, action: ActionId) -> Vec<Checkpoint> {
        self.logs
            .lock()
            .undo
            .iter()
            .filter(|c| c.action == action)
            .cloned()
            .collect()
    }

    /// Drop both logs
    pub fn clear(&self) {
        let mut logs = self.logs.lock();
        logs.undo.clear();
        logs.redo.clear();
    }

    /// Drop whole actions from the front until the cap holds
    fn trim_undo(&self, logs: &mut Logs) {
        while action_count(&logs.undo) > self.max_undo_states {
            let Some(oldest) = logs.undo.front().map(|c| c.action) else {
                break;
            };
            let dropped = take_action(&mut logs.undo, oldest);
            debug!(action = %oldest, checkpoints = dropped.len(), "undo log full; dropped oldest action");
        }
    }

    fn replay(
        &self,
        registry: &Mutex<IdentityRegistry>,
        action: ActionId,
        direction: Direction,
    ) -> usize {
        let entries = {
            let mut logs = self.logs.lock();
            let source = match direction {
                Direction::Undo => &mut logs.undo,
                Direction::Redo => &mut logs.redo,
            };
            take_action(source, action)
        };
        if entries.is_empty() {
            return 0;
        }

        // Restores must not record checkpoints of their own
        let _suspended = JournalSuspend::new(self);

        let mut inverse = Vec::with_capacity(entries.len());
        let mut restored = 0;
        for checkpoint in entries.into_iter().rev() {
            let Some(participant) = registry.lock().lookup(checkpoint.target) else {
                debug!(id = %checkpoint.target, %action, ?direction, "participant gone; skipping checkpoint");
                continue;
            };

            // Capture even if the participant has journalling switched off
            let current = {
                let _forced = participant.journalling().scoped(true);
                participant.save_state()
            };
            if let Some(current) = current {
                inverse.push(Checkpoint::new(action, checkpoint.target, current));
            }
            participant.restore_state(&checkpoint.snapshot);
            restored += 1;
        }

        let mut logs = self.logs.lock();
        match direction {
            Direction::Undo => logs.redo.extend(inverse),
            Direction::Redo => {
                logs.undo.extend(inverse);
                self.trim_undo(&mut logs);
            }
        }
        debug!(%action, ?direction, restored, "replayed action");
        restored
    }
}

/// Remove and return every checkpoint of `action`, keeping relative order
fn take_action(log: &mut VecDeque<Checkpoint>, action: ActionId) -> Vec<Checkpoint> {
    let (taken, kept): (Vec<_>, Vec<_>) = log.drain(..).partition(|c| c.action == action);
    *log = kept.into();
    taken
}

fn action_count(log: &VecDeque<Checkpoint>) -> usize {
    log.iter().map(|c| c.action).collect::<AHashSet<_>>().len()
}

/// Switches journal-wide journalling off, restoring the previous value on drop
struct JournalSuspend<'a> {
    journal: &'a CheckpointJournal,
    previous: bool,
}

impl<'a> JournalSuspend<'a> {
    fn new(journal: &'a CheckpointJournal) -> Self {
        let previous = journal.journalling.swap(false, Ordering::SeqCst);
        Self { journal, previous }
    }
}

impl Drop for JournalSuspend<'_> {
    fn drop(&mut self) {
        self.journal.set_journalling(self.previous);
    }
}
