//! Daily reminder schedule
//!
//! Decides whether the evening nudge is due. Showing it is up to the caller.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_HOUR: u32 = 20;

/// Lines used as the reminder body
pub const REMINDER_LINES: &[&str] = &[
    "You're about to quit like you always do. Prove me wrong.",
    "Everyone who doubted you is waiting for you to fail today.",
    "Discipline or regret. You can't have both. Choose now.",
    "While you make excuses, someone else is taking your spot.",
    "You said you'd change. Was that another lie to yourself?",
    "Weak people skip days. Which one are you?",
    "Your future self is watching. Don't disappoint them again.",
    "Day incomplete = another broken promise to yourself.",
    "The pain of discipline or the pain of regret. Pick one.",
    "You're not tired, you're weak. Get up and finish.",
    "Nobody cares about your excuses. Complete your rules.",
    "Average people rest. Legends never stop. What are you?",
    "Your comfort zone is where your dreams go to die.",
    "Skip today and you're back to being nobody tomorrow.",
    "Winners don't negotiate with their own rules.",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReminderError {
    #[error("Invalid reminder time {hour:02}:{minute:02}")]
    InvalidTime { hour: u32, minute: u32 },
}

/// Persisted reminder preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    pub enabled: bool,
    pub hour: u32,
    pub minute: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_shown: Option<NaiveDate>,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            hour: DEFAULT_HOUR,
            minute: 0,
            last_shown: None,
        }
    }
}

impl ReminderSettings {
    /// Enable the reminder at `hour:minute`
    pub fn schedule(&mut self, hour: u32, minute: u32) -> Result<(), ReminderError> {
        if NaiveTime::from_hms_opt(hour, minute, 0).is_none() {
            return Err(ReminderError::InvalidTime { hour, minute });
        }
        self.enabled = true;
        self.hour = hour;
        self.minute = minute;
        Ok(())
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Due when enabled, not yet shown today and the reminder time has passed
    pub fn due(&self, now: NaiveDateTime) -> bool {
        if !self.enabled || self.last_shown == Some(now.date()) {
            return false;
        }
        match NaiveTime::from_hms_opt(self.hour, self.minute, 0) {
            Some(at) => now.time() >= at,
            None => false,
        }
    }

    pub fn mark_shown(&mut self, today: NaiveDate) {
        self.last_shown = Some(today);
    }
}

/// Pick a reminder line at random
pub fn pick_line() -> &'static str {
    let mut buf = [0u8; 4];
    let index = match getrandom::getrandom(&mut buf) {
        Ok(()) => u32::from_le_bytes(buf) as usize % REMINDER_LINES.len(),
        Err(e) => {
            tracing::debug!("No randomness for reminder line: {}", e);
            0
        }
    };
    REMINDER_LINES[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_disabled_by_default() {
        assert!(!ReminderSettings::default().due(at(23, 59)));
    }

    #[test]
    fn test_due_after_time_once_per_day() {
        let mut settings = ReminderSettings::default();
        settings.schedule(20, 30).unwrap();

        assert!(!settings.due(at(20, 29)));
        assert!(settings.due(at(20, 30)));
        // Later hour with an earlier minute still counts
        assert!(settings.due(at(21, 5)));

        settings.mark_shown(at(21, 5).date());
        assert!(!settings.due(at(22, 0)));
    }

    #[test]
    fn test_rejects_invalid_time() {
        let mut settings = ReminderSettings::default();
        assert_eq!(
            settings.schedule(24, 0),
            Err(ReminderError::InvalidTime { hour: 24, minute: 0 })
        );
        assert!(!settings.enabled);
    }

    #[test]
    fn test_pick_line_is_from_the_list() {
        assert!(REMINDER_LINES.contains(&pick_line()));
    }
}
