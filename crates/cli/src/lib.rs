//! Retrace operator tooling
//!
//! Document scanning and config helpers shared by the `retrace` binary.

pub mod scan;
pub mod util;

pub use scan::{check_document, migrate_legacy_markers, scan_markers, CheckReport, MarkerRecord};
