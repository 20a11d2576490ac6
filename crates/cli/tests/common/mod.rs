//! Common utilities for CLI integration tests

pub mod cli;

use retrace_core::Node;
use std::path::{Path, PathBuf};

/// Write a document with one owner per `(name, tag, id)` under the root
pub fn write_document(dir: &Path, file: &str, owners: &[(&str, &str, &str)]) -> PathBuf {
    let mut root = Node::new("session");
    for (name, tag, id) in owners {
        root.append_child(Node::new(*name))
            .append_child(Node::new(*tag))
            .set_attribute("id", id);
    }
    let path = dir.join(file);
    retrace_core::save_document(&path, &root).unwrap();
    path
}
