//! List identity markers in a saved document

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use retrace_cli::scan::{scan_markers, MarkerRecord};
use retrace_journal::JournalConfig;
use std::path::Path;

pub fn run(path: &Path, config: &JournalConfig, json: bool) -> Result<()> {
    let document = retrace_core::load_document(path)
        .with_context(|| format!("Failed to read document {}", path.display()))?;
    let records = scan_markers(&document, &config.marker_format());
    tracing::debug!("{} markers in {}", records.len(), path.display());

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!("{}", path.display().bold());
    println!(
        "{}: {}\n",
        "Content hash".dimmed(),
        document.content_hash().short().dimmed()
    );

    if records.is_empty() {
        println!("{}", "No identity markers found".dimmed());
        return Ok(());
    }

    for record in &records {
        print_record(record);
    }
    println!("\n{} markers", records.len());
    Ok(())
}

fn print_record(record: &MarkerRecord) {
    let id = match record.id {
        Some(id) => id.to_string().green().to_string(),
        None => format!("invalid ({:?})", record.raw).red().to_string(),
    };
    let tag = if record.tag == retrace_journal::LEGACY_MARKER_TAG {
        format!("{} (legacy)", record.tag).yellow().to_string()
    } else {
        record.tag.dimmed().to_string()
    };
    println!("  {:>8}  {}  {}", id, record.path.cyan(), tag);
}
