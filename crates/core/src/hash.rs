//! BLAKE3 content hashing for tree nodes

use crate::tree::Node;
use serde::{Deserialize, Serialize};

/// A BLAKE3 hash (32 bytes)
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeHash([u8; 32]);

impl NodeHash {
    const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        const HEX_CHARS: &[u8] = b"0123456789abcdef";
        let mut hex = String::with_capacity(64);
        for &byte in &self.0 {
            hex.push(HEX_CHARS[(byte >> 4) as usize] as char);
            hex.push(HEX_CHARS[(byte & 0xf) as usize] as char);
        }
        hex
    }

    /// First 12 hex characters, enough to tell snapshots apart in listings
    pub fn short(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(12);
        hex
    }
}

impl std::fmt::Debug for NodeHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeHash({})", self.to_hex())
    }
}

impl std::fmt::Display for NodeHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Hash a node and its whole subtree
///
/// Layout fed to the hasher, recursively:
/// - name_len: u32 LE, name bytes
/// - attr_count: u32 LE, then per attribute (sorted by key): key_len, key, value_len, value
/// - child_count: u32 LE, then each child in document order
///
/// Same content always produces the same hash.
pub fn hash_node(node: &Node) -> NodeHash {
    let mut hasher = blake3::Hasher::new();
    feed_node(&mut hasher, node);
    NodeHash::from_bytes(*hasher.finalize().as_bytes())
}

fn feed_str(hasher: &mut blake3::Hasher, s: &str) {
    hasher.update(&(s.len() as u32).to_le_bytes());
    hasher.update(s.as_bytes());
}

fn feed_node(hasher: &mut blake3::Hasher, node: &Node) {
    feed_str(hasher, node.name());

    hasher.update(&(node.attribute_count() as u32).to_le_bytes());
    for (key, value) in node.attributes() {
        feed_str(hasher, key);
        feed_str(hasher, value);
    }

    hasher.update(&(node.child_count() as u32).to_le_bytes());
    for child in node.children() {
        feed_node(hasher, child);
    }
}
