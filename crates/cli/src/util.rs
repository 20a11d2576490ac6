//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use retrace_journal::JournalConfig;
use std::path::{Path, PathBuf};

/// Default config location: `<config dir>/retrace/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("retrace").join("config.toml"))
}

/// Load the effective configuration
///
/// An explicit path must exist. Without one, the default location is used
/// when present, built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>) -> Result<JournalConfig> {
    if let Some(path) = explicit {
        return JournalConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            tracing::debug!("Using config at {}", path.display());
            JournalConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))
        }
        _ => Ok(JournalConfig::default()),
    }
}
