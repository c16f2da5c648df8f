//! Challenge tracker: the day/streak state machine
//!
//! [`transitions`] and [`rollover`] are pure functions over
//! [`ChallengeState`]. [`ChallengeTracker`] wires them to the injected
//! ports: it loads and persists through a [`Persistence`], reads dates from a
//! [`Clock`] and publishes what happened to a [`MirrorSink`].

pub mod rollover;
pub mod transitions;

pub use rollover::{evaluate_rollover, RolloverKind};

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;

use crate::achievements::{Achievement, AchievementLedger};
use crate::challenge::{day_key, validate_habits, ChallengeState, HabitError, HabitTemplate};
use crate::clock::Clock;
use crate::mirror::{
    ActivityKind, ActivityRecord, DailyProgress, MirrorEvent, MirrorSink, StatsSnapshot,
    STREAK_MILESTONES,
};
use crate::store::{Persistence, StoreError};
use crate::subscription::SubscriptionState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("No habit with id {0} on today's checklist")]
    UnknownRule(u32),

    #[error("{date} is already concluded")]
    DayAlreadyConcluded { date: NaiveDate },

    #[error("{date} is in the future")]
    FutureDate { date: NaiveDate },

    #[error(transparent)]
    Habit(#[from] HabitError),
}

/// Result of a mutation plus the outcome of persisting it.
///
/// The in-memory state is authoritative either way; a failed write is logged
/// and handed back so the caller can decide whether to surface it.
#[derive(Debug)]
#[must_use]
pub struct Applied<T> {
    pub value: T,
    pub persisted: Result<(), StoreError>,
}

impl<T> Applied<T> {
    fn new(value: T, persisted: Result<(), StoreError>) -> Self {
        Self { value, persisted }
    }

    pub fn is_persisted(&self) -> bool {
        self.persisted.is_ok()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// How a day was concluded, for the mirror. A completion carries only the
/// achievements it newly unlocked.
enum Conclusion<'a> {
    Completed(&'a [&'static Achievement]),
    Failed,
}

/// Checklist and notes of the day about to be concluded
struct DayTrace {
    date: NaiveDate,
    day_number: u32,
    rules_completed: Vec<bool>,
    notes: String,
}

impl DayTrace {
    fn capture(state: &ChallengeState, date: NaiveDate) -> Self {
        Self {
            date,
            day_number: state.current_day,
            rules_completed: state.today_rules.iter().map(|rule| rule.completed).collect(),
            notes: state.today_notes.clone(),
        }
    }
}

pub struct ChallengeTracker {
    state: ChallengeState,
    achievements: AchievementLedger,
    persistence: Persistence,
    clock: Arc<dyn Clock>,
    mirror: Arc<dyn MirrorSink>,
}

impl ChallengeTracker {
    /// Load the saved challenge and settle any stale day.
    ///
    /// Missing or unreadable state starts a fresh challenge.
    pub fn open(
        persistence: Persistence,
        clock: Arc<dyn Clock>,
        mirror: Arc<dyn MirrorSink>,
    ) -> (Self, Applied<RolloverKind>) {
        let today = clock.today();
        let state = match persistence.load_state() {
            Some(state) => state,
            None => {
                tracing::info!("No saved challenge, starting at day 1");
                ChallengeState::initial(today, &persistence.user_habits())
            }
        };
        let achievements = persistence.load_achievements();

        let mut tracker = Self {
            state,
            achievements,
            persistence,
            clock,
            mirror,
        };
        let rollover = tracker.refresh();
        (tracker, rollover)
    }

    /// Settle the stale day if the clock moved past it.
    ///
    /// Always persists, so a freshly created state is written on open.
    pub fn refresh(&mut self) -> Applied<RolloverKind> {
        let today = self.clock.today();
        let habits = self.persistence.user_habits();
        let photos = self.persistence.all_workout_photos();
        let trace = DayTrace::capture(&self.state, self.state.last_updated);

        let mut kind = evaluate_rollover(&mut self.state, today, &habits, &photos);
        let mut persisted = self.save_state();

        match &mut kind {
            RolloverKind::Completed { achievements, .. } => {
                let (fresh, ledger) = self.record_achievements(achievements);
                persisted = persisted.and(ledger);
                self.publish(trace, Conclusion::Completed(&fresh));
                *achievements = fresh;
            }
            RolloverKind::Failed { .. } => self.publish(trace, Conclusion::Failed),
            RolloverKind::Lapsed { .. } | RolloverKind::None => {}
        }

        Applied::new(kind, persisted)
    }

    pub fn state(&self) -> &ChallengeState {
        &self.state
    }

    pub fn achievements(&self) -> &AchievementLedger {
        &self.achievements
    }

    pub fn habits(&self) -> Vec<HabitTemplate> {
        self.persistence.user_habits()
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub fn toggle_rule(&mut self, rule_id: u32) -> Result<Applied<bool>, TrackerError> {
        let completed = transitions::toggle_rule(&mut self.state, rule_id)?;
        tracing::debug!("Rule {} now {}", rule_id, if completed { "done" } else { "open" });
        Ok(Applied::new(completed, self.save_state()))
    }

    /// Conclude today as a success and return the achievements it unlocked.
    ///
    /// A threshold crossed again after a reset is not returned or mirrored.
    pub fn complete_day(&mut self) -> Result<Applied<Vec<&'static Achievement>>, TrackerError> {
        let today = self.guard_unconcluded()?;
        let trace = DayTrace::capture(&self.state, today);
        let photo = self.persistence.workout_photo(today);

        let crossed =
            transitions::complete_day(&mut self.state, today, &self.persistence.user_habits(), photo);
        tracing::info!(
            "Day {} complete, now on day {} (best {})",
            trace.day_number,
            self.state.current_day,
            self.state.best_streak
        );

        let saved = self.save_state();
        let (fresh, ledger) = self.record_achievements(&crossed);
        self.publish(trace, Conclusion::Completed(&fresh));
        Ok(Applied::new(fresh, saved.and(ledger)))
    }

    /// Conclude today as a failure: back to day 1
    pub fn fail_day(&mut self) -> Result<Applied<()>, TrackerError> {
        let today = self.guard_unconcluded()?;
        let trace = DayTrace::capture(&self.state, today);
        let photo = self.persistence.workout_photo(today);

        transitions::fail_day(&mut self.state, today, &self.persistence.user_habits(), photo);
        tracing::info!(
            "Day {} failed, back to day 1 ({} failures)",
            trace.day_number,
            self.state.failure_count
        );

        let persisted = self.save_state();
        self.publish(trace, Conclusion::Failed);
        Ok(Applied::new((), persisted))
    }

    pub fn update_notes(&mut self, notes: &str) -> Applied<()> {
        transitions::update_notes(&mut self.state, notes);
        Applied::new((), self.save_state())
    }

    pub fn update_bedtime(&mut self, bedtime: &str) -> Applied<()> {
        transitions::update_bedtime(&mut self.state, bedtime);
        Applied::new((), self.save_state())
    }

    pub fn complete_onboarding(&mut self, bedtime: &str) -> Applied<()> {
        transitions::complete_onboarding(&mut self.state, bedtime);
        tracing::info!("Onboarding complete, bedtime {}", bedtime);
        Applied::new((), self.save_state())
    }

    /// Start over at day 1. Unlocked achievements are kept.
    pub fn reset_all(&mut self) -> Applied<()> {
        self.state = transitions::reset_all(self.clock.today(), &self.persistence.user_habits());
        tracing::info!("Challenge reset to day 1");
        Applied::new((), self.save_state())
    }

    /// Move today's notes into the history. Returns false for blank notes.
    pub fn save_note(&mut self) -> Applied<bool> {
        if !transitions::save_note(&mut self.state, self.clock.now()) {
            return Applied::new(false, Ok(()));
        }
        Applied::new(true, self.save_state())
    }

    /// Rebuild today's checklist from the stored habit list
    pub fn reload_habits(&mut self) -> Applied<()> {
        transitions::reload_habits(&mut self.state, &self.persistence.user_habits());
        Applied::new((), self.save_state())
    }

    /// Replace the habit list, within the plan's limit, and rebuild today's
    /// checklist from it
    pub fn set_habits(
        &mut self,
        texts: &[String],
        subscription: &SubscriptionState,
    ) -> Result<Applied<Vec<HabitTemplate>>, TrackerError> {
        let habits = validate_habits(texts, subscription.max_habits())?;
        let saved = self.persistence.save_user_habits(&habits);
        if let Err(e) = &saved {
            tracing::warn!("Failed to save habits: {}", e);
        }

        transitions::reload_habits(&mut self.state, &habits);
        tracing::info!("Habit list set to {} habits", habits.len());
        let persisted = saved.and(self.save_state());
        Ok(Applied::new(habits, persisted))
    }

    /// Attach a workout photo to `date`, today when `None`.
    ///
    /// Only the photo map changes. A day already in the history keeps the
    /// photo it was concluded with.
    pub fn save_workout_photo(
        &mut self,
        date: Option<NaiveDate>,
        payload: &str,
    ) -> Result<Applied<NaiveDate>, TrackerError> {
        let today = self.clock.today();
        let date = date.unwrap_or(today);
        if date > today {
            return Err(TrackerError::FutureDate { date });
        }

        let persisted = self.persistence.save_workout_photo(date, payload);
        if let Err(e) = &persisted {
            tracing::warn!("Failed to save workout photo for {}: {}", date, e);
        }
        Ok(Applied::new(date, persisted))
    }

    fn guard_unconcluded(&self) -> Result<NaiveDate, TrackerError> {
        let today = self.clock.today();
        if self.state.concluded_on(today) {
            return Err(TrackerError::DayAlreadyConcluded { date: today });
        }
        Ok(today)
    }

    fn save_state(&self) -> Result<(), StoreError> {
        let result = self.persistence.save_state(&self.state);
        if let Err(e) = &result {
            tracing::warn!("Failed to save challenge state: {}", e);
        }
        result
    }

    /// Unlock what the day crossed. Returns the achievements that were not
    /// unlocked before, plus the outcome of saving the ledger.
    fn record_achievements(
        &mut self,
        crossed: &[&'static Achievement],
    ) -> (Vec<&'static Achievement>, Result<(), StoreError>) {
        let now = self.clock.now();
        let day = self.state.current_day;
        let fresh: Vec<&'static Achievement> = crossed
            .iter()
            .copied()
            .filter(|achievement| self.achievements.unlock(achievement.id, day, now))
            .collect();
        if fresh.is_empty() {
            return (fresh, Ok(()));
        }

        for achievement in &fresh {
            tracing::info!("Achievement unlocked: {}", achievement.name);
        }
        let result = self.persistence.save_achievements(&self.achievements);
        if let Err(e) = &result {
            tracing::warn!("Failed to save achievements: {}", e);
        }
        (fresh, result)
    }

    fn publish(&self, trace: DayTrace, conclusion: Conclusion<'_>) {
        let day = self.state.current_day;
        let completed = matches!(conclusion, Conclusion::Completed(_));

        self.mirror
            .submit(MirrorEvent::UpsertStats(StatsSnapshot::from_state(&self.state)));

        match conclusion {
            Conclusion::Completed(achievements) => {
                for achievement in achievements {
                    let id = achievement.id.as_str();
                    self.mirror.submit(MirrorEvent::SaveAchievement {
                        achievement_id: id.to_string(),
                        day_unlocked: day,
                    });
                    self.mirror.submit(MirrorEvent::RecordActivity(
                        ActivityRecord::new(ActivityKind::Achievement, day).with_achievement(id),
                    ));
                }
                self.mirror
                    .submit(MirrorEvent::RecordActivity(ActivityRecord::new(ActivityKind::DayComplete, day)));
                if STREAK_MILESTONES.contains(&day) {
                    self.mirror.submit(MirrorEvent::RecordActivity(
                        ActivityRecord::new(ActivityKind::StreakMilestone, day).with_streak(day),
                    ));
                }
            }
            Conclusion::Failed => {
                self.mirror.submit(MirrorEvent::RecordActivity(ActivityRecord::new(
                    ActivityKind::DayFail,
                    trace.day_number,
                )));
            }
        }

        self.mirror.submit(MirrorEvent::SaveDailyProgress(DailyProgress {
            date: day_key(trace.date),
            day_number: trace.day_number,
            completed,
            failed: !completed,
            notes: trace.notes,
            rules_completed: trace.rules_completed,
        }));
    }
}
