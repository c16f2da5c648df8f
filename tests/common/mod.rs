//! Shared test utilities for tracker integration tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use sixtysix::clock::FixedClock;
use sixtysix::mirror::MemoryMirror;
use sixtysix::store::{open_backend, MemoryStore, Persistence, StateStore, StorageBackend};
use sixtysix::{ChallengeTracker, RolloverKind};

/// A tracker with controllable time and a recording mirror
pub struct TestApp {
    pub store: Arc<dyn StateStore>,
    pub clock: Arc<FixedClock>,
    pub mirror: Arc<MemoryMirror>,
}

impl TestApp {
    /// In-memory app starting on 2026-01-01
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// App on a real backend rooted at `dir`
    pub fn on_disk(backend: StorageBackend, dir: &Path) -> Self {
        let store = open_backend(backend, dir).expect("Failed to open store");
        Self::with_store(store)
    }

    pub fn with_store(store: Arc<dyn StateStore>) -> Self {
        Self {
            store,
            clock: Arc::new(FixedClock::on(start_date())),
            mirror: Arc::new(MemoryMirror::new()),
        }
    }

    pub fn persistence(&self) -> Persistence {
        Persistence::new(self.store.clone())
    }

    /// Open (or re-open) the tracker, returning what the rollover did
    pub fn open(&self) -> (ChallengeTracker, RolloverKind) {
        let (tracker, rollover) =
            ChallengeTracker::open(self.persistence(), self.clock.clone(), self.mirror.clone());
        assert!(rollover.is_persisted(), "rollover was not persisted");
        (tracker, rollover.into_value())
    }

    /// Move the clock forward and open the tracker again
    pub fn next_day(&self, days: u64) -> (ChallengeTracker, RolloverKind) {
        self.clock.advance_days(days);
        self.open()
    }
}

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).expect("valid date")
}

/// Tick every habit on today's checklist
pub fn check_all(tracker: &mut ChallengeTracker) {
    let ids: Vec<u32> = tracker.state().today_rules.iter().map(|rule| rule.id).collect();
    for id in ids {
        let applied = tracker.toggle_rule(id).expect("rule exists");
        assert!(applied.value, "rule {} was already checked", id);
    }
}
