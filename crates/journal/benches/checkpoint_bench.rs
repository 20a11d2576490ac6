//! Registry and journal hot-path benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use parking_lot::Mutex;
use retrace_journal::{JournalId, Journalled, Journalling, Node, Session};
use std::sync::Arc;

struct Param {
    journalling: Journalling,
    value: Mutex<i64>,
}

impl Param {
    fn new(session: &Session) -> Arc<Self> {
        Arc::new_cyclic(|this| Param {
            journalling: Journalling::new(session, this.clone()),
            value: Mutex::new(0),
        })
    }
}

impl Journalled for Param {
    fn journalling(&self) -> &Journalling {
        &self.journalling
    }

    fn node_name(&self) -> &str {
        "param"
    }

    fn save_settings(&self, node: &mut Node) {
        node.set_attribute("value", *self.value.lock());
    }

    fn load_settings(&self, node: &Node) {
        if let Some(value) = node.attribute("value").and_then(|v| v.parse().ok()) {
            *self.value.lock() = value;
        }
    }
}

fn bench_registry(c: &mut Criterion) {
    let session = Session::default();

    c.bench_function("participant_create_drop", |b| {
        b.iter(|| {
            let param = Param::new(&session);
            black_box(param.id())
        });
    });

    let params: Vec<_> = (0..1_000).map(|_| Param::new(&session)).collect();
    c.bench_function("registry_lookup_1k", |b| {
        b.iter(|| {
            for param in &params {
                black_box(session.lookup(param.id()));
            }
        });
    });

    c.bench_function("change_id_roundtrip", |b| {
        let param = Param::new(&session);
        let home = param.id();
        let away = JournalId::new(u32::MAX - 1);
        b.iter(|| {
            param.change_id(away).unwrap();
            param.change_id(home).unwrap();
        });
    });
}

fn bench_journal(c: &mut Criterion) {
    let session = Session::default();
    let params: Vec<_> = (0..16).map(|_| Param::new(&session)).collect();

    c.bench_function("checkpoint_undo_redo_16", |b| {
        b.iter(|| {
            let action = session.begin_action();
            for param in &params {
                param.add_journal_checkpoint(action);
            }
            black_box(session.undo(action));
            black_box(session.redo(action));
        });
    });

    c.bench_function("save_restore_state", |b| {
        let param = &params[0];
        b.iter(|| {
            let node = param.save_state().unwrap();
            param.restore_state(black_box(&node));
        });
    });
}

criterion_group!(benches, bench_registry, bench_journal);
criterion_main!(benches);
