//! Identity registry: journal id -> live participant
//!
//! The registry only indexes participants. It stores `Weak` handles and never
//! keeps a participant alive; the participant frees its own entry when it is
//! dropped.

use crate::error::{Descriptor, JournalError};
use crate::id::JournalId;
use crate::participant::Journalled;
use crate::Result;
use ahash::AHashMap;
use std::sync::{Arc, Weak};
use tracing::trace;

/// An entry whose key does not match the participant's own identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdMismatch {
    /// Key the participant is registered under
    pub key: JournalId,
    /// Identifier the participant reports
    pub actual: JournalId,
}

/// Mapping from identifier to participant plus the id counter
pub struct IdentityRegistry {
    participants: AHashMap<JournalId, Weak<dyn Journalled>>,
    /// Next candidate for `allocate`; never 0
    next_id: u32,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self {
            participants: AHashMap::new(),
            next_id: 1,
        }
    }

    /// Bind a fresh identifier to `participant`
    ///
    /// Identifiers come from a monotonic counter. Values bound through
    /// [`reallocate`](Self::reallocate) ahead of the counter are skipped.
    pub fn allocate(&mut self, participant: Weak<dyn Journalled>) -> JournalId {
        loop {
            let id = JournalId::new(self.next_id);
            self.next_id = self.next_id.wrapping_add(1).max(1);

            if !self.participants.contains_key(&id) {
                self.participants.insert(id, participant);
                trace!(%id, "allocated journal id");
                return id;
            }
        }
    }

    /// Remove the mapping for `id`; returns whether anything was bound
    pub fn free(&mut self, id: JournalId) -> bool {
        if !id.is_assigned() {
            return false;
        }
        let freed = self.participants.remove(&id).is_some();
        if freed {
            trace!(%id, "freed journal id");
        }
        freed
    }

    /// Remove the mapping for `id` only if it still points at `participant`
    pub fn release(&mut self, id: JournalId, participant: &Weak<dyn Journalled>) -> bool {
        match self.participants.get(&id) {
            Some(existing) if same_participant(existing, participant) => self.free(id),
            _ => false,
        }
    }

    /// Bind a specific identifier, as requested by a restored document
    ///
    /// Succeeds if `id` is unbound or already bound to `participant`.
    /// Fails without touching the registry if any other participant holds
    /// it, including one whose handle cannot be upgraded yet because it is
    /// still being constructed. Entries of dropped participants are removed
    /// by their own `release`.
    pub fn reallocate(&mut self, id: JournalId, participant: &Weak<dyn Journalled>) -> Result<()> {
        if !id.is_assigned() {
            return Err(JournalError::UnassignedIdentifier);
        }

        if let Some(existing) = self.participants.get(&id) {
            if same_participant(existing, participant) {
                return Ok(());
            }
            let occupier = existing
                .upgrade()
                .map(|occupier| occupier.descriptor())
                .unwrap_or_else(Descriptor::unavailable);
            return Err(JournalError::IdentifierConflict { id, occupier });
        }

        self.participants.insert(id, participant.clone());
        trace!(%id, "reallocated journal id");
        Ok(())
    }

    /// Find the live participant bound to `id`
    pub fn lookup(&self, id: JournalId) -> Option<Arc<dyn Journalled>> {
        self.participants.get(&id)?.upgrade()
    }

    pub fn contains(&self, id: JournalId) -> bool {
        self.participants.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// All bound identifiers, sorted
    pub fn ids(&self) -> Vec<JournalId> {
        let mut ids: Vec<_> = self.participants.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Drop entries whose participant is gone; returns how many were removed
    pub fn prune(&mut self) -> usize {
        let before = self.participants.len();
        self.participants.retain(|_, weak| weak.strong_count() > 0);
        before - self.participants.len()
    }

    /// Entries whose participant reports a different identifier than its key
    pub fn verify(&self) -> Vec<IdMismatch> {
        let mut mismatches: Vec<_> = self
            .participants
            .iter()
            .filter_map(|(&key, weak)| {
                let actual = weak.upgrade()?.id();
                (actual != key).then_some(IdMismatch { key, actual })
            })
            .collect();
        mismatches.sort_unstable_by_key(|m| m.key);
        mismatches
    }
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Address equality, ignoring trait-object metadata
fn same_participant(a: &Weak<dyn Journalled>, b: &Weak<dyn Journalled>) -> bool {
    std::ptr::eq(a.as_ptr().cast::<()>(), b.as_ptr().cast::<()>())
}
