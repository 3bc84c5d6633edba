//! Tests for tracing instrumentation.
//!
//! The loaders report per-file read totals and reference statistics as
//! tracing events; these tests check the events are emitted.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use scram_profile::{
    config::LoadOptions, format::ReadFormat, reference::load_reference, run::load_reads,
};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

/// A simple layer that counts events at a given level or above.
struct EventCounter {
    level: Level,
    count: Arc<AtomicUsize>,
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for EventCounter {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        if event.metadata().level() <= &self.level {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn count_events<F: FnOnce()>(level: Level, f: F) -> usize {
    let count = Arc::new(AtomicUsize::new(0));
    let layer = EventCounter {
        level,
        count: Arc::clone(&count),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    count.load(Ordering::SeqCst)
}

#[test]
fn reference_load_emits_info_event() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ref.fa");
    fs::write(&path, ">h1\nACGT\n").unwrap();

    let events = count_events(Level::INFO, || {
        load_reference(&path).unwrap();
    });
    assert!(events > 0, "should emit tracing events");
}

#[test]
fn unknown_reference_bases_emit_warning() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ref.fa");
    fs::write(&path, ">h1\nACGTRY\n>h2\nACGT\n").unwrap();

    let warnings = count_events(Level::WARN, || {
        load_reference(&path).unwrap();
    });
    assert_eq!(warnings, 1);
}

#[test]
fn aggregation_emits_debug_events() {
    // Workers run on their own threads, outside the scoped subscriber; the
    // pool start and each merge are logged on the calling thread.
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reads.fa");
    fs::write(&path, ">r\nACGTACGT\n").unwrap();

    let opts = LoadOptions {
        format: ReadFormat::Fasta,
        min_len: 1,
        normalize: false,
        ..LoadOptions::default()
    };
    let mut loaded = 0;
    let events = count_events(Level::DEBUG, || {
        loaded = load_reads(&[&path], &opts).unwrap().0.len();
    });
    assert_eq!(loaded, 1);
    assert!(events >= 2, "expected pool and merge events, got {events}");
}
