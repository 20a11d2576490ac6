//! Print the effective configuration

use anyhow::Result;
use owo_colors::OwoColorize;
use retrace_journal::JournalConfig;
use std::path::Path;

pub fn run(config: &JournalConfig, explicit: Option<&Path>) -> Result<()> {
    println!("{}", "Journal Configuration".bold());
    match explicit
        .map(Path::to_path_buf)
        .or_else(retrace_cli::util::default_config_path)
    {
        Some(path) if path.exists() => {
            println!("{}: {}\n", "Location".dimmed(), path.display().dimmed())
        }
        Some(path) => println!(
            "{}: {} {}\n",
            "Location".dimmed(),
            path.display().dimmed(),
            "(not present, using defaults)".dimmed()
        ),
        None => println!("{}\n", "(defaults)".dimmed()),
    }

    println!(
        "  {} = {} {}",
        "max_undo_states".cyan(),
        config.max_undo_states,
        "(actions; oldest dropped first)".dimmed()
    );
    println!("  {} = {:?}", "marker_tag".cyan(), config.marker_tag);
    println!(
        "  {} = {}",
        "accept_legacy_marker".cyan(),
        config.accept_legacy_marker
    );
    Ok(())
}
