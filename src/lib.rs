//! sixtysix - a 66-day habit challenge tracker
//!
//! One challenge per user: a daily checklist of habits, a day counter that
//! climbs while days are completed and drops back to day 1 on a miss, a best
//! streak, a dated history and threshold badges.
//!
//! ## Layout
//!
//! - [`challenge`]: the persisted record and its parts
//! - [`tracker`]: day transitions, rollover of stale days, the tracker service
//! - [`achievements`]: badge table, threshold checks, unlock ledger
//! - [`store`]: key/value persistence (JSON files, SQLite, memory)
//! - [`mirror`]: best-effort copy of progress to a remote table API
//! - [`subscription`], [`squad`], [`reminder`]: plan gating, squad codes, daily nudge

pub mod achievements;
pub mod challenge;
pub mod clock;
pub mod config;
pub mod mirror;
pub mod reminder;
pub mod squad;
pub mod store;
pub mod subscription;
pub mod tracker;

pub use challenge::{ChallengeState, DayEntry, HabitRule, HabitTemplate};
pub use tracker::{Applied, ChallengeTracker, RolloverKind, TrackerError};
