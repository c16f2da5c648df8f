//! Record of unlocked achievements

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::definitions::AchievementId;

/// An achievement the user has unlocked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAchievement {
    pub id: String,
    /// Local timestamp, RFC 3339 without offset
    pub unlocked_at: String,
    pub day_unlocked: u32,
}

/// Set of unlocked achievements, keyed by ID.
///
/// Stored as a plain JSON array. A repeated ID keeps its first entry;
/// unknown IDs from older data are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<UserAchievement>", into = "Vec<UserAchievement>")]
pub struct AchievementLedger {
    entries: Vec<UserAchievement>,
}

impl From<Vec<UserAchievement>> for AchievementLedger {
    fn from(stored: Vec<UserAchievement>) -> Self {
        let mut ledger = Self::default();
        for entry in stored {
            if !ledger.contains(&entry.id) {
                ledger.entries.push(entry);
            }
        }
        ledger
    }
}

impl From<AchievementLedger> for Vec<UserAchievement> {
    fn from(ledger: AchievementLedger) -> Self {
        ledger.entries
    }
}

impl AchievementLedger {
    pub fn entries(&self) -> &[UserAchievement] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn get(&self, id: AchievementId) -> Option<&UserAchievement> {
        self.entries.iter().find(|entry| entry.id == id.as_str())
    }

    /// Record an unlock. Returns false if the ID was already unlocked.
    pub fn unlock(&mut self, id: AchievementId, day: u32, at: NaiveDateTime) -> bool {
        if self.contains(id.as_str()) {
            return false;
        }
        self.entries.push(UserAchievement {
            id: id.as_str().to_string(),
            unlocked_at: at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            day_unlocked: day,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 1)
            .unwrap()
            .and_hms_opt(21, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let mut ledger = AchievementLedger::default();
        assert!(ledger.unlock(AchievementId::WeekWarrior, 7, at()));
        assert!(!ledger.unlock(AchievementId::WeekWarrior, 8, at()));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(AchievementId::WeekWarrior).unwrap().day_unlocked, 7);
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let mut ledger = AchievementLedger::default();
        ledger.unlock(AchievementId::FirstDay, 1, at());
        let json = serde_json::to_value(&ledger).unwrap();

        assert!(json.is_array());
        assert_eq!(json[0]["id"], "first_day");
        assert_eq!(json[0]["unlockedAt"], "2026-02-01T21:30:00");
        assert_eq!(json[0]["dayUnlocked"], 1);
    }

    #[test]
    fn test_repeated_id_keeps_first_entry() {
        let json = r#"[
            {"id": "first_day", "unlockedAt": "2026-02-01T00:00:00", "dayUnlocked": 2},
            {"id": "legacy_badge", "unlockedAt": "2026-02-02T00:00:00", "dayUnlocked": 3},
            {"id": "first_day", "unlockedAt": "2026-03-01T00:00:00", "dayUnlocked": 2}
        ]"#;
        let ledger: AchievementLedger = serde_json::from_str(json).unwrap();

        assert_eq!(ledger.len(), 2);
        assert!(ledger.contains("legacy_badge"));
        assert_eq!(
            ledger.get(AchievementId::FirstDay).unwrap().unlocked_at,
            "2026-02-01T00:00:00"
        );
    }
}
