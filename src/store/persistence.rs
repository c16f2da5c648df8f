//! Typed JSON access on top of a [`StateStore`]
//!
//! Reads never fail: missing values come back as `None` (or a default), and
//! unreadable or corrupt values are logged and treated as missing. Writes
//! return their error so the caller decides whether to surface it.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{StateStore, StoreError, StoreKey};
use crate::achievements::AchievementLedger;
use crate::challenge::{day_key, default_habits, ChallengeState, HabitTemplate};
use crate::reminder::ReminderSettings;
use crate::subscription::{SubscriptionState, TrialRecord};

/// Workout photos keyed by day ("YYYY-MM-DD" -> image payload)
pub type PhotoMap = BTreeMap<String, String>;

/// Typed persistence port used by the tracker and the CLI
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn StateStore>,
}

impl Persistence {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    fn read_json<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        let raw = match self.store.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", key.as_str(), e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring corrupt {} value: {}", key.as_str(), e);
                None
            }
        }
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.as_str(),
            source,
        })?;
        self.store.write(key, &raw)
    }

    // ========================================
    // CHALLENGE STATE
    // ========================================

    /// Stored challenge state, `None` when absent or corrupt
    pub fn load_state(&self) -> Option<ChallengeState> {
        self.read_json(StoreKey::ChallengeData)
    }

    pub fn save_state(&self, state: &ChallengeState) -> Result<(), StoreError> {
        self.write_json(StoreKey::ChallengeData, state)
    }

    // ========================================
    // WORKOUT PHOTOS
    // ========================================

    pub fn all_workout_photos(&self) -> PhotoMap {
        self.read_json(StoreKey::WorkoutPhotos).unwrap_or_default()
    }

    pub fn workout_photo(&self, date: NaiveDate) -> Option<String> {
        self.all_workout_photos().remove(&day_key(date))
    }

    /// Attach a photo to a day, replacing any previous one
    pub fn save_workout_photo(&self, date: NaiveDate, payload: &str) -> Result<(), StoreError> {
        let mut photos = self.all_workout_photos();
        photos.insert(day_key(date), payload.to_string());
        self.write_json(StoreKey::WorkoutPhotos, &photos)
    }

    // ========================================
    // ACHIEVEMENTS
    // ========================================

    pub fn load_achievements(&self) -> AchievementLedger {
        self.read_json(StoreKey::Achievements).unwrap_or_default()
    }

    pub fn save_achievements(&self, ledger: &AchievementLedger) -> Result<(), StoreError> {
        self.write_json(StoreKey::Achievements, ledger)
    }

    // ========================================
    // HABITS
    // ========================================

    /// The user's habit list, or the defaults when none is stored
    pub fn user_habits(&self) -> Vec<HabitTemplate> {
        match self.read_json::<Vec<String>>(StoreKey::UserHabits) {
            Some(texts) if !texts.is_empty() => HabitTemplate::from_texts(texts),
            _ => default_habits(),
        }
    }

    pub fn save_user_habits(&self, habits: &[HabitTemplate]) -> Result<(), StoreError> {
        let texts: Vec<&str> = habits.iter().map(|h| h.text.as_str()).collect();
        self.write_json(StoreKey::UserHabits, &texts)
    }

    // ========================================
    // SUBSCRIPTION
    // ========================================

    pub fn subscription(&self) -> Option<SubscriptionState> {
        self.read_json(StoreKey::Subscription)
    }

    pub fn save_subscription(&self, state: &SubscriptionState) -> Result<(), StoreError> {
        self.write_json(StoreKey::Subscription, state)
    }

    pub fn trial(&self) -> Option<TrialRecord> {
        self.read_json(StoreKey::Trial)
    }

    pub fn save_trial(&self, trial: &TrialRecord) -> Result<(), StoreError> {
        self.write_json(StoreKey::Trial, trial)
    }

    // ========================================
    // REMINDER
    // ========================================

    pub fn reminder(&self) -> ReminderSettings {
        self.read_json(StoreKey::Reminder).unwrap_or_default()
    }

    pub fn save_reminder(&self, settings: &ReminderSettings) -> Result<(), StoreError> {
        self.write_json(StoreKey::Reminder, settings)
    }
}
