//! Session: the shared identity registry and checkpoint journal
//!
//! Every participant is constructed against an explicit [`Session`]. The
//! session owns one registry and one journal, each guarded by a single lock
//! taken per operation. Dropping the last handle ends the session;
//! participants that outlive it keep their identity and skip deregistration.

use crate::config::JournalConfig;
use crate::id::{ActionId, JournalId};
use crate::journal::CheckpointJournal;
use crate::participant::Journalled;
use crate::registry::{IdMismatch, IdentityRegistry};
use crate::Result;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

pub(crate) struct SessionShared {
    pub(crate) registry: Mutex<IdentityRegistry>,
    pub(crate) journal: CheckpointJournal,
    pub(crate) config: JournalConfig,
    next_action: AtomicU64,
}

/// Handle to one editing session; cheap to clone
#[derive(Clone)]
pub struct Session {
    shared: Arc<SessionShared>,
}

impl Session {
    /// Start a session with a validated config
    pub fn new(config: JournalConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::start(config))
    }

    fn start(config: JournalConfig) -> Self {
        debug!(max_undo_states = config.max_undo_states, "journal session started");
        Self {
            shared: Arc::new(SessionShared {
                registry: Mutex::new(IdentityRegistry::new()),
                journal: CheckpointJournal::new(config.max_undo_states),
                config,
                next_action: AtomicU64::new(1),
            }),
        }
    }

    pub(crate) fn from_shared(shared: Arc<SessionShared>) -> Self {
        Self { shared }
    }

    pub(crate) fn shared(&self) -> &Arc<SessionShared> {
        &self.shared
    }

    pub fn config(&self) -> &JournalConfig {
        &self.shared.config
    }

    pub fn journal(&self) -> &CheckpointJournal {
        &self.shared.journal
    }

    /// Mint a fresh action id
    pub fn begin_action(&self) -> ActionId {
        ActionId::new(self.shared.next_action.fetch_add(1, Ordering::SeqCst))
    }

    /// Live participant bound to `id`
    pub fn lookup(&self, id: JournalId) -> Option<Arc<dyn Journalled>> {
        self.shared.registry.lock().lookup(id)
    }

    /// Number of registered identifiers
    pub fn participant_count(&self) -> usize {
        self.shared.registry.lock().len()
    }

    /// Registered identifiers, sorted
    pub fn ids(&self) -> Vec<JournalId> {
        self.shared.registry.lock().ids()
    }

    /// Registry entries whose key disagrees with the participant's own id
    pub fn verify_identities(&self) -> Vec<IdMismatch> {
        self.shared.registry.lock().verify()
    }

    /// Drop registry entries of participants that no longer exist
    pub fn prune(&self) -> usize {
        self.shared.registry.lock().prune()
    }

    pub fn undo(&self, action: ActionId) -> usize {
        self.shared.journal.undo(&self.shared.registry, action)
    }

    pub fn redo(&self, action: ActionId) -> usize {
        self.shared.journal.redo(&self.shared.registry, action)
    }

    pub fn undo_last(&self) -> Option<(ActionId, usize)> {
        self.shared.journal.undo_last(&self.shared.registry)
    }

    pub fn redo_last(&self) -> Option<(ActionId, usize)> {
        self.shared.journal.redo_last(&self.shared.registry)
    }

    /// Whether two handles refer to the same session
    pub fn same_session(&self, other: &Session) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::start(JournalConfig::default())
    }
}
