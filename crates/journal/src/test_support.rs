//! Minimal participant used by unit tests

use crate::participant::{Journalled, Journalling};
use crate::session::Session;
use parking_lot::Mutex;
use retrace_core::Node;
use std::sync::Arc;

pub(crate) struct Knob {
    journalling: Journalling,
    label: String,
    level: Mutex<i64>,
    /// Journalling flag seen by each load_settings call, when observed
    load_observations: Mutex<Option<Arc<Mutex<Vec<bool>>>>>,
}

impl Knob {
    pub(crate) fn new(session: &Session, label: &str, level: i64) -> Arc<Self> {
        Arc::new_cyclic(|this| Knob {
            journalling: Journalling::new(session, this.clone()),
            label: label.to_string(),
            level: Mutex::new(level),
            load_observations: Mutex::new(None),
        })
    }

    pub(crate) fn level(&self) -> i64 {
        *self.level.lock()
    }

    pub(crate) fn set_level(&self, level: i64) {
        *self.level.lock() = level;
    }

    pub(crate) fn observe_journalling_on_load(&self) -> Arc<Mutex<Vec<bool>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        *self.load_observations.lock() = Some(log.clone());
        log
    }
}

impl Journalled for Knob {
    fn journalling(&self) -> &Journalling {
        &self.journalling
    }

    fn node_name(&self) -> &str {
        "knob"
    }

    fn display_name(&self) -> Option<String> {
        Some(self.label.clone())
    }

    fn save_settings(&self, node: &mut Node) {
        node.set_attribute("level", self.level());
    }

    fn load_settings(&self, node: &Node) {
        if let Some(level) = node.attribute("level").and_then(|v| v.parse().ok()) {
            self.set_level(level);
        }
        if let Some(log) = self.load_observations.lock().as_ref() {
            log.lock().push(self.is_journalling());
        }
    }
}
