//! The challenge state record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::habit::{HabitRule, HabitTemplate};
use super::history::DayEntry;

/// Length of one challenge cycle in days
pub const CHALLENGE_LENGTH: u32 = 66;

/// Bedtime used before onboarding sets one
pub const DEFAULT_BEDTIME: &str = "22:00";

/// Everything the tracker knows about a user's challenge.
///
/// Serialized with the same field names as the persisted JSON record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeState {
    /// Advisory "HH:MM", never enforced
    pub bedtime: String,
    pub current_day: u32,
    pub best_streak: u32,
    pub failure_count: u32,
    pub today_rules: Vec<HabitRule>,
    #[serde(default)]
    pub today_notes: String,
    #[serde(default)]
    pub history: Vec<DayEntry>,
    /// Last day this state was evaluated against "now"
    pub last_updated: NaiveDate,
    #[serde(default)]
    pub onboarded: bool,
}

impl ChallengeState {
    /// Fresh state for a first launch
    pub fn initial(today: NaiveDate, habits: &[HabitTemplate]) -> Self {
        Self {
            bedtime: DEFAULT_BEDTIME.to_string(),
            current_day: 1,
            best_streak: 0,
            failure_count: 0,
            today_rules: fresh_checklist(habits),
            today_notes: String::new(),
            history: Vec::new(),
            last_updated: today,
            onboarded: false,
        }
    }

    /// True when the checklist is non-empty and every entry is checked
    pub fn all_rules_completed(&self) -> bool {
        !self.today_rules.is_empty() && self.today_rules.iter().all(|rule| rule.completed)
    }

    pub fn completed_rules(&self) -> usize {
        self.today_rules.iter().filter(|rule| rule.completed).count()
    }

    /// Number of successfully concluded days in the history
    pub fn total_completions(&self) -> u32 {
        self.history
            .iter()
            .filter(|entry| entry.completed && !entry.is_saved_note())
            .count() as u32
    }

    /// Consecutive days concluded successfully in the current cycle.
    ///
    /// Achievement thresholds are measured against this count.
    pub fn completed_streak(&self) -> u32 {
        self.current_day.saturating_sub(1)
    }

    /// Whether the history already holds a concluded entry for `date`
    pub fn concluded_on(&self, date: NaiveDate) -> bool {
        self.history.iter().any(|entry| entry.concludes(date))
    }

    /// Days left until the cycle is finished (0 once day 66 is passed)
    pub fn days_remaining(&self) -> u32 {
        (CHALLENGE_LENGTH + 1).saturating_sub(self.current_day)
    }
}

/// An all-unchecked checklist for the given habits
pub fn fresh_checklist(habits: &[HabitTemplate]) -> Vec<HabitRule> {
    habits.iter().map(HabitRule::from_template).collect()
}
