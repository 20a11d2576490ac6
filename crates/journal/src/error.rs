//! Error types for identity and journal operations

use crate::id::JournalId;
use std::fmt;
use std::path::PathBuf;

/// What kind of participant holds an identifier, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    /// Participant kind (its node name)
    pub kind: String,
    /// Display name, for kinds that carry one
    pub display_name: Option<String>,
}

impl Descriptor {
    /// Occupier whose handle cannot be upgraded: still inside
    /// `Arc::new_cyclic`, or already dropping
    pub(crate) fn unavailable() -> Self {
        Self {
            kind: "participant under construction or teardown".to_string(),
            display_name: None,
        }
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "{}:{}", self.kind, name),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Errors raised by the identity registry, participants and configuration
///
/// None of these are fatal: conflicts and malformed markers leave the
/// participant under its current identity and restoration continues.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// The requested identifier is bound to a different participant
    #[error("journal id {id} already in use by {occupier}")]
    IdentifierConflict { id: JournalId, occupier: Descriptor },

    /// An identity marker whose `id` attribute is not a number
    #[error("malformed journal id {raw:?}")]
    MalformedIdentifier { raw: String },

    /// The reserved identifier 0 cannot be bound
    #[error("journal id 0 is reserved for unassigned participants")]
    UnassignedIdentifier,

    /// The session this participant registered with has ended
    #[error("journal session is no longer available")]
    MissingSession,

    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config content is invalid
    #[error("invalid journal config: {0}")]
    Config(String),
}
