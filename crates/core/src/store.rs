//! Reading and writing node documents on disk

use crate::tree::Node;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Load a JSON node document
pub fn load_document(path: &Path) -> Result<Node> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read document: {}", path.display()))?;
    Node::from_json(&text).with_context(|| format!("Invalid document: {}", path.display()))
}

/// Write a JSON node document, replacing the target atomically
pub fn save_document(path: &Path, root: &Node) -> Result<()> {
    let json = root.to_json_pretty()?;
    atomic_write(path, json.as_bytes())
}

/// Atomic write helper
///
/// Writes data to a temporary file next to the target, fsyncs it, then
/// renames it over the target path.
pub fn atomic_write(target: &Path, data: &[u8]) -> Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(target)
        .with_context(|| format!("Failed to replace {}", target.display()))?;
    Ok(())
}
