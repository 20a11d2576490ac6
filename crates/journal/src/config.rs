//! Journal configuration
//!
//! Loaded from TOML:
//! ```toml
//! max_undo_states = 100
//! marker_tag = "journallingObject"
//! accept_legacy_marker = true
//! ```

use crate::error::JournalError;
use crate::marker::{MarkerFormat, MARKER_TAG};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default cap on the undo log
pub const DEFAULT_MAX_UNDO_STATES: usize = 100;

/// Session-wide journal settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Maximum actions kept on the undo log (oldest whole action dropped first)
    pub max_undo_states: usize,
    /// Tag written for the identity marker child
    pub marker_tag: String,
    /// Also recognize the legacy `journal` marker tag when restoring
    pub accept_legacy_marker: bool,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            max_undo_states: DEFAULT_MAX_UNDO_STATES,
            marker_tag: MARKER_TAG.to_string(),
            accept_legacy_marker: true,
        }
    }
}

impl JournalConfig {
    /// Parse and validate a TOML config
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| JournalError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| JournalError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| JournalError::Config(e.to_string()))
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.max_undo_states == 0 {
            return Err(JournalError::Config(
                "max_undo_states must be at least 1".into(),
            ));
        }
        if self.marker_tag.trim().is_empty() {
            return Err(JournalError::Config("marker_tag must not be empty".into()));
        }
        Ok(())
    }

    /// Marker read/write rules derived from this config
    pub fn marker_format(&self) -> MarkerFormat {
        MarkerFormat {
            tag: self.marker_tag.clone(),
            accept_legacy: self.accept_legacy_marker,
        }
    }
}
