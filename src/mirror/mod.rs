//! Best-effort mirror of stats and activity to a remote table store
//!
//! The tracker hands events to a [`MirrorSink`] and moves on. Nothing waits
//! for the remote side: failures are logged and dropped, there are no
//! retries, and concurrent devices simply overwrite each other.
//!
//! ```text
//! ChallengeTracker ──submit──▶ BackgroundMirror ──channel──▶ worker thread
//!                                                              │
//!                                       IdentityProvider ◀─────┤
//!                                       RemoteMirror (HTTP) ◀──┘
//! ```

mod rest;
mod worker;

pub use rest::RestMirror;
pub use worker::BackgroundMirror;

use std::sync::Mutex;

use serde::Serialize;
use thiserror::Error;

use crate::challenge::ChallengeState;

/// Stats row upserted per user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub current_day: u32,
    pub current_streak: u32,
    pub best_streak: u32,
    pub total_completions: u32,
    pub total_failures: u32,
    /// Day key the local state was last evaluated for
    pub last_updated: String,
}

impl StatsSnapshot {
    pub fn from_state(state: &ChallengeState) -> Self {
        Self {
            current_day: state.current_day,
            // The streak is the current position in the cycle
            current_streak: state.current_day,
            best_streak: state.best_streak,
            total_completions: state.total_completions(),
            total_failures: state.failure_count,
            last_updated: crate::challenge::day_key(state.last_updated),
        }
    }
}

/// Activity feed entry types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    DayComplete,
    StreakMilestone,
    Achievement,
    DayFail,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DayComplete => "day_complete",
            Self::StreakMilestone => "streak_milestone",
            Self::Achievement => "achievement",
            Self::DayFail => "day_fail",
        }
    }
}

/// Append-only activity record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRecord {
    /// Client-generated id, lets the remote side drop duplicates
    pub id: String,
    pub activity_type: ActivityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievement_id: Option<String>,
}

impl ActivityRecord {
    pub fn new(activity_type: ActivityKind, day_number: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            activity_type,
            day_number: Some(day_number),
            streak_count: None,
            achievement_id: None,
        }
    }

    pub fn with_streak(mut self, streak: u32) -> Self {
        self.streak_count = Some(streak);
        self
    }

    pub fn with_achievement(mut self, id: &str) -> Self {
        self.achievement_id = Some(id.to_string());
        self
    }
}

/// Outcome of one concluded day, upserted per user and date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyProgress {
    pub date: String,
    pub day_number: u32,
    pub completed: bool,
    pub failed: bool,
    pub notes: String,
    pub rules_completed: Vec<bool>,
}

/// One write for the remote store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorEvent {
    UpsertStats(StatsSnapshot),
    RecordActivity(ActivityRecord),
    SaveAchievement {
        achievement_id: String,
        day_unlocked: u32,
    },
    SaveDailyProgress(DailyProgress),
}

impl MirrorEvent {
    /// Remote table the event is written to
    pub fn table(&self) -> &'static str {
        match self {
            Self::UpsertStats(_) => "user_stats",
            Self::RecordActivity(_) => "activity_feed",
            Self::SaveAchievement { .. } => "user_achievements",
            Self::SaveDailyProgress(_) => "daily_progress",
        }
    }
}

/// Streak days announced as milestones on the activity feed
pub const STREAK_MILESTONES: &[u32] = &[7, 14, 21, 30, 66];

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("{table}: remote returned HTTP {status}")]
    Status { table: &'static str, status: u16 },

    #[error("{table}: transport error: {message}")]
    Transport { table: &'static str, message: String },

    #[error("Remote mirror is not configured: {0}")]
    NotConfigured(&'static str),
}

/// Blocking writer for the remote store
pub trait RemoteMirror: Send {
    fn apply(&self, user_id: &str, event: &MirrorEvent) -> Result<(), MirrorError>;
}

/// Who the events belong to. `None` means signed out: events are dropped.
pub trait IdentityProvider: Send + Sync {
    fn user_id(&self) -> Option<String>;
}

/// Identity fixed at startup (from configuration)
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(Option<String>);

impl StaticIdentity {
    pub fn new(user_id: Option<String>) -> Self {
        Self(user_id.filter(|id| !id.trim().is_empty()))
    }
}

impl IdentityProvider for StaticIdentity {
    fn user_id(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Fire-and-forget entry point used by the tracker
pub trait MirrorSink: Send + Sync {
    fn submit(&self, event: MirrorEvent);
}

/// Drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMirror;

impl MirrorSink for NoMirror {
    fn submit(&self, _event: MirrorEvent) {}
}

/// Keeps every submitted event in memory
#[derive(Debug, Default)]
pub struct MemoryMirror {
    events: Mutex<Vec<MirrorEvent>>,
}

impl MemoryMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all events recorded so far
    pub fn drain(&self) -> Vec<MirrorEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl MirrorSink for MemoryMirror {
    fn submit(&self, event: MirrorEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}
