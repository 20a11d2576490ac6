//! Identity marker nodes embedded in saved participant state
//!
//! A marker is a child of the participant's primary node:
//! `<journallingObject id="17" metadata="1"/>`. Older documents used the tag
//! `journal` for the same purpose; readers may accept both.

use crate::error::JournalError;
use crate::id::JournalId;
use crate::Result;
use retrace_core::Node;

/// Canonical marker tag, written by every save
pub const MARKER_TAG: &str = "journallingObject";

/// Marker tag found in legacy documents
pub const LEGACY_MARKER_TAG: &str = "journal";

/// How markers are written and recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerFormat {
    /// Tag written on save and always accepted on restore
    pub tag: String,
    /// Also accept [`LEGACY_MARKER_TAG`] on restore
    pub accept_legacy: bool,
}

impl Default for MarkerFormat {
    fn default() -> Self {
        Self {
            tag: MARKER_TAG.to_string(),
            accept_legacy: true,
        }
    }
}

impl MarkerFormat {
    /// Build the marker node for an identifier
    pub fn marker_node(&self, id: JournalId) -> Node {
        let mut node = Node::new(self.tag.as_str());
        node.set_attribute("id", id);
        node.set_attribute("metadata", 1);
        node
    }

    /// Whether a node is an identity marker under these rules
    pub fn is_marker(&self, node: &Node) -> bool {
        node.name() == self.tag || (self.accept_legacy && node.name() == LEGACY_MARKER_TAG)
    }

    /// Direct children of `node` that are identity markers, in document order
    pub fn markers<'a>(&'a self, node: &'a Node) -> impl Iterator<Item = &'a Node> + 'a {
        node.children().filter(move |child| self.is_marker(child))
    }
}

/// Parse the `id` attribute of a marker
///
/// A missing, non-numeric or negative value is `MalformedIdentifier`; zero is
/// `UnassignedIdentifier`. Restore treats both as "no identifier present".
pub fn parse_marker_id(marker: &Node) -> Result<JournalId> {
    let raw = marker.attribute("id").unwrap_or_default();
    let value: u32 = raw
        .trim()
        .parse()
        .map_err(|_| JournalError::MalformedIdentifier {
            raw: raw.to_string(),
        })?;

    let id = JournalId::new(value);
    if !id.is_assigned() {
        return Err(JournalError::UnassignedIdentifier);
    }
    Ok(id)
}
