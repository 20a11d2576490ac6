//! Retrace core - tree-node primitive for participant state
//!
//! This crate provides:
//! - Attribute-bearing, nestable tree nodes
//! - BLAKE3 content hashing of nodes
//! - JSON document load/save with atomic replace

pub mod hash;
pub mod store;
pub mod tree;

// Re-export main types for convenience
pub use hash::{hash_node, NodeHash};
pub use store::{atomic_write, load_document, save_document};
pub use tree::{Node, Visit, Walk};

/// Common result type used throughout retrace-core
pub type Result<T> = anyhow::Result<T>;
