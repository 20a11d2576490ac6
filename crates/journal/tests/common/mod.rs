//! Participants used by the integration tests

#![allow(dead_code)]

use parking_lot::Mutex;
use retrace_journal::{Journalled, Journalling, Node, Session};
use std::sync::Arc;

/// A named level control
pub struct Fader {
    journalling: Journalling,
    name: String,
    level: Mutex<i64>,
    muted: Mutex<bool>,
}

impl Fader {
    pub fn new(session: &Session, name: &str, level: i64) -> Arc<Self> {
        Arc::new_cyclic(|this| Fader {
            journalling: Journalling::new(session, this.clone()),
            name: name.to_string(),
            level: Mutex::new(level),
            muted: Mutex::new(false),
        })
    }

    pub fn level(&self) -> i64 {
        *self.level.lock()
    }

    pub fn set_level(&self, level: i64) {
        *self.level.lock() = level;
    }

    pub fn muted(&self) -> bool {
        *self.muted.lock()
    }

    pub fn set_muted(&self, muted: bool) {
        *self.muted.lock() = muted;
    }
}

impl Journalled for Fader {
    fn journalling(&self) -> &Journalling {
        &self.journalling
    }

    fn node_name(&self) -> &str {
        "fader"
    }

    fn display_name(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn save_settings(&self, node: &mut Node) {
        node.set_attribute("level", self.level());
        node.set_attribute("muted", u8::from(self.muted()));
    }

    fn load_settings(&self, node: &Node) {
        if let Some(level) = node.attribute("level").and_then(|v| v.parse().ok()) {
            self.set_level(level);
        }
        if let Some(muted) = node.bool_attribute("muted") {
            self.set_muted(muted);
        }
    }
}

/// A strip that owns faders and saves them as nested participants
pub struct Channel {
    journalling: Journalling,
    pub faders: Vec<Arc<Fader>>,
}

impl Channel {
    pub fn new(session: &Session, names: &[&str]) -> Arc<Self> {
        let faders = names.iter().map(|name| Fader::new(session, name, 0)).collect();
        Arc::new_cyclic(|this| Channel {
            journalling: Journalling::new(session, this.clone()),
            faders,
        })
    }
}

impl Journalled for Channel {
    fn journalling(&self) -> &Journalling {
        &self.journalling
    }

    fn node_name(&self) -> &str {
        "channel"
    }

    fn save_settings(&self, node: &mut Node) {
        for fader in &self.faders {
            fader.save_state_into(node);
        }
    }

    fn load_settings(&self, node: &Node) {
        let saved = node.children().filter(|c| c.name() == "fader");
        for (fader, child) in self.faders.iter().zip(saved) {
            fader.restore_state(child);
        }
    }
}

/// Whether `found` is the same allocation as `expected`
pub fn same_object<T: Journalled>(found: &Arc<dyn Journalled>, expected: &Arc<T>) -> bool {
    Arc::as_ptr(found) as *const () == Arc::as_ptr(expected) as *const ()
}
