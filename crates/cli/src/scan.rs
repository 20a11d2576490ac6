//! Identity marker scanning over whole documents

use retrace_core::Node;
use retrace_journal::{parse_marker_id, JournalId, MarkerFormat, LEGACY_MARKER_TAG};
use serde::Serialize;
use std::collections::BTreeMap;

/// One identity marker found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerRecord {
    /// Path of the marker node itself
    pub path: String,
    /// Path of the node the marker belongs to
    pub owner_path: String,
    /// Name of the node the marker belongs to
    pub owner: String,
    /// Marker tag as written
    pub tag: String,
    /// Parsed identifier, if usable
    pub id: Option<JournalId>,
    /// Raw `id` attribute text
    pub raw: String,
}

/// Result of checking a document for identity problems
#[derive(Debug, Default)]
pub struct CheckReport {
    pub markers: usize,
    /// Identifiers claimed by more than one node, with the owners' paths
    pub duplicates: BTreeMap<JournalId, Vec<String>>,
    /// Markers whose id is missing, non-numeric or zero
    pub malformed: Vec<MarkerRecord>,
    /// Markers still using the legacy tag
    pub legacy: usize,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.malformed.is_empty()
    }
}

/// Every identity marker in the document, in document order
pub fn scan_markers(root: &Node, format: &MarkerFormat) -> Vec<MarkerRecord> {
    let mut records = Vec::new();
    for visit in root.walk() {
        for (index, child) in visit.node.children().enumerate() {
            if !format.is_marker(child) {
                continue;
            }
            records.push(MarkerRecord {
                path: format!("{}/{}[{}]", visit.path, child.name(), index),
                owner_path: visit.path.clone(),
                owner: visit.node.name().to_string(),
                tag: child.name().to_string(),
                id: parse_marker_id(child).ok(),
                raw: child.attribute("id").unwrap_or_default().to_string(),
            });
        }
    }
    records
}

/// Find duplicate and malformed identifiers
///
/// An identifier is duplicated only when distinct nodes claim it; one node
/// carrying both a legacy and a canonical marker for the same id is fine.
pub fn check_document(root: &Node, format: &MarkerFormat) -> CheckReport {
    let records = scan_markers(root, format);
    let mut report = CheckReport {
        markers: records.len(),
        ..CheckReport::default()
    };

    let mut claims: BTreeMap<JournalId, Vec<String>> = BTreeMap::new();
    for record in records {
        if record.tag == LEGACY_MARKER_TAG && record.tag != format.tag {
            report.legacy += 1;
        }
        match record.id {
            Some(id) => {
                let owners = claims.entry(id).or_default();
                if !owners.contains(&record.owner_path) {
                    owners.push(record.owner_path);
                }
            }
            None => report.malformed.push(record),
        }
    }
    report.duplicates = claims.into_iter().filter(|(_, paths)| paths.len() > 1).collect();
    report
}

/// Rename legacy marker children to `canonical`; returns how many changed
///
/// Only `journal` children carrying an `id` attribute are touched, so
/// unrelated elements sharing the name are left alone.
pub fn migrate_legacy_markers(root: &mut Node, canonical: &str) -> usize {
    if canonical == LEGACY_MARKER_TAG {
        return 0;
    }
    let mut renamed = 0;
    root.visit_mut(&mut |node| {
        for child in node.children_mut() {
            if child.name() == LEGACY_MARKER_TAG && child.has_attribute("id") {
                child.set_name(canonical);
                renamed += 1;
            }
        }
    });
    renamed
}
