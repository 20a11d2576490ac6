//! Report duplicate and malformed identifiers

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use retrace_cli::scan::check_document;
use retrace_journal::JournalConfig;
use std::path::Path;

pub fn run(path: &Path, config: &JournalConfig) -> Result<()> {
    let document = retrace_core::load_document(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    let report = check_document(&document, &config.marker_format());

    println!("{} {} markers", "Checked".bold(), report.markers);

    for (id, paths) in &report.duplicates {
        println!("{} id {} claimed {} times", "✗".red(), id, paths.len());
        for path in paths {
            println!("    {}", path.dimmed());
        }
    }
    for record in &report.malformed {
        println!(
            "{} malformed marker at {} (id = {:?})",
            "!".yellow(),
            record.path,
            record.raw
        );
    }
    if report.legacy > 0 {
        println!(
            "{} {} legacy markers; run {} to rewrite them",
            "!".yellow(),
            report.legacy,
            "retrace migrate".cyan()
        );
    }

    if !report.duplicates.is_empty() {
        anyhow::bail!("{} duplicate identifiers in {}", report.duplicates.len(), path.display());
    }
    if report.is_clean() {
        println!("{} No identity problems", "✓".green());
    }
    Ok(())
}
