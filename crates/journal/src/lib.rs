//! Identity registry and checkpoint journal for undo/redo
//!
//! This crate provides:
//! - Session-unique participant identifiers with collision-safe restore
//! - Scoped suspension of change tracking
//! - Save/restore of participant state with an embedded identity marker
//! - Action-grouped undo/redo checkpoints

pub mod checkpoint;
pub mod config;
pub mod error;
pub mod id;
pub mod journal;
pub mod marker;
pub mod participant;
pub mod registry;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use checkpoint::Checkpoint;
pub use config::JournalConfig;
pub use error::{Descriptor, JournalError};
pub use id::{ActionId, JournalId};
pub use journal::CheckpointJournal;
pub use marker::{parse_marker_id, MarkerFormat, LEGACY_MARKER_TAG, MARKER_TAG};
pub use participant::{Journalled, Journalling, SuspendGuard};
pub use registry::{IdMismatch, IdentityRegistry};
pub use session::Session;

pub use retrace_core::Node;

/// Result type for journal operations
pub type Result<T> = std::result::Result<T, JournalError>;
