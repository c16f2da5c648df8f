//! History log entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used for day keys ("YYYY-MM-DD")
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date as a day key
pub fn day_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// One entry in the history log.
///
/// Concluded days carry a plain day key in `date`. Saved notes carry a full
/// timestamp and `saved: true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub date: String,
    pub completed: bool,
    pub failed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved: Option<bool>,
}

impl DayEntry {
    /// A successfully concluded day
    pub fn completed(date: NaiveDate, notes: &str, workout_photo: Option<String>) -> Self {
        Self {
            date: day_key(date),
            completed: true,
            failed: false,
            notes: non_empty(notes),
            workout_photo,
            saved: None,
        }
    }

    /// A failed day
    pub fn failed(date: NaiveDate, notes: &str, workout_photo: Option<String>) -> Self {
        Self {
            date: day_key(date),
            completed: false,
            failed: true,
            notes: non_empty(notes),
            workout_photo,
            saved: None,
        }
    }

    /// A note saved mid-day, stamped with the full time it was saved
    pub fn saved_note(timestamp: String, notes: &str) -> Self {
        Self {
            date: timestamp,
            completed: false,
            failed: false,
            notes: Some(notes.to_string()),
            workout_photo: None,
            saved: Some(true),
        }
    }

    pub fn is_saved_note(&self) -> bool {
        self.saved.unwrap_or(false)
    }

    /// Whether this entry concludes the given day
    pub fn concludes(&self, date: NaiveDate) -> bool {
        !self.is_saved_note() && (self.completed || self.failed) && self.date == day_key(date)
    }
}

fn non_empty(notes: &str) -> Option<String> {
    (!notes.is_empty()).then(|| notes.to_string())
}
