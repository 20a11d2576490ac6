//! Journalling participants
//!
//! Any object that takes part in undo/redo embeds a [`Journalling`] and
//! implements [`Journalled`]. The trait's provided methods implement the
//! save/restore protocol around the object's own field persistence:
//!
//! - save: field state first, then an identity marker child if journalling
//!   is enabled;
//! - restore: field state first, then identity reconciliation with
//!   journalling suspended for the duration.
//!
//! Participants must live in an `Arc` so the registry can hold a `Weak`
//! back-reference. Build them with `Arc::new_cyclic`:
//!
//! ```ignore
//! Arc::new_cyclic(|this| Fader {
//!     journalling: Journalling::new(&session, this.clone()),
//!     level: Mutex::new(0),
//! })
//! ```

use crate::error::{Descriptor, JournalError};
use crate::id::{ActionId, JournalId};
use crate::marker::{parse_marker_id, MarkerFormat};
use crate::session::{Session, SessionShared};
use crate::Result;
use parking_lot::Mutex;
use retrace_core::Node;
use smallvec::SmallVec;
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

struct State {
    id: JournalId,
    enabled: bool,
    /// Flags pushed by scoped suspensions; empty outside of one
    saved_enabled: SmallVec<[bool; 4]>,
}

/// Identity and journalling flag of one participant
pub struct Journalling {
    state: Mutex<State>,
    /// The object this belongs to, as registered
    this: Weak<dyn Journalled>,
    session: Weak<SessionShared>,
}

impl Journalling {
    /// Register a new participant with the session and take a fresh id
    ///
    /// `this` is the weak handle `Arc::new_cyclic` passes to its closure.
    pub fn new<T: Journalled + 'static>(session: &Session, this: Weak<T>) -> Self {
        let this: Weak<dyn Journalled> = this;
        let shared = session.shared();
        let id = shared.registry.lock().allocate(this.clone());

        Self {
            state: Mutex::new(State {
                id,
                enabled: true,
                saved_enabled: SmallVec::new(),
            }),
            this,
            session: Arc::downgrade(shared),
        }
    }

    pub fn id(&self) -> JournalId {
        self.state.lock().id
    }

    pub fn is_journalling(&self) -> bool {
        self.state.lock().enabled
    }

    pub fn set_journalling(&self, enabled: bool) {
        self.state.lock().enabled = enabled;
    }

    /// Push the current flag and switch to `enabled`
    ///
    /// Must be paired with [`restore_journalling_state`](Self::restore_journalling_state).
    /// Prefer [`suspend`](Self::suspend), which pairs them automatically.
    pub fn save_journalling_state(&self, enabled: bool) {
        let mut state = self.state.lock();
        let previous = state.enabled;
        state.saved_enabled.push(previous);
        state.enabled = enabled;
    }

    /// Pop the flag pushed by the matching save
    pub fn restore_journalling_state(&self) {
        let mut state = self.state.lock();
        match state.saved_enabled.pop() {
            Some(previous) => state.enabled = previous,
            None => debug!(id = %state.id, "journalling state restored without a matching save"),
        }
    }

    /// Disable journalling until the returned guard drops
    pub fn suspend(&self) -> SuspendGuard<'_> {
        self.scoped(false)
    }

    /// Set journalling to `enabled` until the returned guard drops
    pub fn scoped(&self, enabled: bool) -> SuspendGuard<'_> {
        self.save_journalling_state(enabled);
        SuspendGuard { journalling: self }
    }

    /// Number of scoped suspensions currently in effect
    pub fn suspension_depth(&self) -> usize {
        self.state.lock().saved_enabled.len()
    }

    /// The session this participant registered with, if it still exists
    pub fn session(&self) -> Option<Session> {
        self.session.upgrade().map(Session::from_shared)
    }

    fn marker_format(&self) -> MarkerFormat {
        self.session
            .upgrade()
            .map(|shared| shared.config.marker_format())
            .unwrap_or_default()
    }

    /// Move this participant to identifier `new_id`
    ///
    /// On conflict the participant keeps its current identifier and the
    /// conflict is logged and returned.
    pub fn change_id(&self, new_id: JournalId) -> Result<()> {
        let current = self.id();
        if new_id == current {
            return Ok(());
        }
        if !new_id.is_assigned() {
            return Err(JournalError::UnassignedIdentifier);
        }
        let shared = self.session.upgrade().ok_or(JournalError::MissingSession)?;

        // Rebind, free and update under one registry lock
        let mut registry = shared.registry.lock();
        if let Err(err) = registry.reallocate(new_id, &self.this) {
            warn!(%current, requested = %new_id, "{}; keeping current id", err);
            return Err(err);
        }
        registry.free(current);
        self.state.lock().id = new_id;
        debug!(from = %current, to = %new_id, "journal id changed");
        Ok(())
    }
}

impl Drop for Journalling {
    fn drop(&mut self) {
        // Session teardown may already have happened; nothing to notify then
        if let Some(shared) = self.session.upgrade() {
            let id = self.state.get_mut().id;
            shared.registry.lock().release(id, &self.this);
        }
    }
}

/// Scoped override of journalling; restores the previous flag on drop
pub struct SuspendGuard<'a> {
    journalling: &'a Journalling,
}

impl Drop for SuspendGuard<'_> {
    fn drop(&mut self) {
        self.journalling.restore_journalling_state();
    }
}

/// An object whose state is tracked for undo/redo
///
/// Implementors supply the identity core and their own field persistence;
/// everything else is provided.
pub trait Journalled: Send + Sync {
    /// The embedded identity core
    fn journalling(&self) -> &Journalling;

    /// Kind name, also used as the tag of the saved node
    fn node_name(&self) -> &str;

    /// Human-readable name, for kinds that have one
    fn display_name(&self) -> Option<String> {
        None
    }

    /// Write this object's fields into its primary node
    fn save_settings(&self, node: &mut Node);

    /// Read this object's fields back from its primary node
    fn load_settings(&self, node: &Node);

    fn descriptor(&self) -> Descriptor {
        Descriptor {
            kind: self.node_name().to_string(),
            display_name: self.display_name(),
        }
    }

    fn id(&self) -> JournalId {
        self.journalling().id()
    }

    fn is_journalling(&self) -> bool {
        self.journalling().is_journalling()
    }

    fn set_journalling(&self, enabled: bool) {
        self.journalling().set_journalling(enabled);
    }

    /// Save full state, or `None` when journalling is disabled
    fn save_state(&self) -> Option<Node> {
        let journalling = self.journalling();
        if !journalling.is_journalling() {
            return None;
        }

        let mut node = Node::new(self.node_name());
        self.save_settings(&mut node);
        node.append_child(journalling.marker_format().marker_node(self.id()));
        Some(node)
    }

    /// Save full state as a child of `parent`; returns whether anything was written
    fn save_state_into(&self, parent: &mut Node) -> bool {
        match self.save_state() {
            Some(node) => {
                parent.append_child(node);
                true
            }
            None => false,
        }
    }

    /// Restore fields, then adopt the identifier recorded in `node` if any
    fn restore_state(&self, node: &Node) {
        self.load_settings(node);

        let journalling = self.journalling();
        let _suspended = journalling.suspend();

        let format = journalling.marker_format();
        for marker in format.markers(node) {
            let new_id = match parse_marker_id(marker) {
                Ok(id) => id,
                Err(err) => {
                    debug!(id = %self.id(), "ignoring identity marker: {}", err);
                    continue;
                }
            };
            if new_id == self.id() {
                continue;
            }
            // Conflicts are already reported by change_id
            if let Err(err) = journalling.change_id(new_id) {
                debug!(id = %self.id(), "identity not restored: {}", err);
            }
        }
    }

    fn change_id(&self, new_id: JournalId) -> Result<()> {
        self.journalling().change_id(new_id)
    }

    /// Record the current state under `action` before a mutation
    fn add_journal_checkpoint(&self, action: ActionId) -> bool {
        match self.journalling().session.upgrade() {
            Some(shared) => shared.journal.add_checkpoint(self, action),
            None => false,
        }
    }
}
