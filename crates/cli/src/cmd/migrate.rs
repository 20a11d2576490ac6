//! Rewrite legacy identity markers to the canonical tag

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use retrace_cli::scan::migrate_legacy_markers;
use retrace_journal::JournalConfig;
use std::path::Path;

pub fn run(path: &Path, output: Option<&Path>, config: &JournalConfig) -> Result<()> {
    let mut document = retrace_core::load_document(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;

    let renamed = migrate_legacy_markers(&mut document, &config.marker_tag);
    let target = output.unwrap_or(path);

    if renamed == 0 && output.is_none() {
        println!("{} Nothing to migrate", "✓".green());
        return Ok(());
    }

    retrace_core::save_document(target, &document)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    tracing::info!("Migrated {} markers into {}", renamed, target.display());

    println!(
        "{} Rewrote {} markers to {} in {}",
        "✓".green(),
        renamed,
        config.marker_tag.cyan(),
        target.display()
    );
    Ok(())
}
