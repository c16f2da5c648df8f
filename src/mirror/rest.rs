//! HTTP mirror for a PostgREST-style table API
//!
//! Upserts use `Prefer: resolution=merge-duplicates` with an `on_conflict`
//! column list; activities are plain inserts.

use std::time::Duration;

use chrono::Utc;
use serde_json::{json, Value};

use super::{MirrorError, MirrorEvent, RemoteMirror};

/// Writes mirror events to `<base_url>/rest/v1/<table>`
#[derive(Clone)]
pub struct RestMirror {
    base_url: String,
    api_key: String,
    client: ureq::Agent,
}

impl RestMirror {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Self {
        let client = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5))
            .timeout(timeout)
            .build();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        }
    }

    fn table_url(&self, table: &str, on_conflict: Option<&str>) -> String {
        match on_conflict {
            Some(columns) => format!("{}/rest/v1/{}?on_conflict={}", self.base_url, table, columns),
            None => format!("{}/rest/v1/{}", self.base_url, table),
        }
    }

    fn post(&self, table: &'static str, url: &str, upsert: bool, body: &Value) -> Result<(), MirrorError> {
        let prefer = if upsert {
            "resolution=merge-duplicates,return=minimal"
        } else {
            "return=minimal"
        };

        let result = self
            .client
            .post(url)
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Prefer", prefer)
            .send_json(body);

        match result {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, _)) => Err(MirrorError::Status { table, status }),
            Err(e) => Err(MirrorError::Transport {
                table,
                message: e.to_string(),
            }),
        }
    }
}

/// Request body for an event, with the owning user attached
pub(crate) fn event_body(user_id: &str, event: &MirrorEvent) -> Value {
    let now = Utc::now().to_rfc3339();
    match event {
        MirrorEvent::UpsertStats(stats) => json!({
            "user_id": user_id,
            "current_day": stats.current_day,
            "current_streak": stats.current_streak,
            "best_streak": stats.best_streak,
            "total_completions": stats.total_completions,
            "total_failures": stats.total_failures,
            "last_updated": stats.last_updated,
            "updated_at": now,
        }),
        MirrorEvent::RecordActivity(activity) => with_user(user_id, activity),
        MirrorEvent::SaveDailyProgress(progress) => with_user(user_id, progress),
        MirrorEvent::SaveAchievement {
            achievement_id,
            day_unlocked,
        } => json!({
            "user_id": user_id,
            "achievement_id": achievement_id,
            "day_unlocked": day_unlocked,
            "unlocked_at": now,
        }),
    }
}

fn with_user(user_id: &str, row: &impl serde::Serialize) -> Value {
    let mut body = serde_json::to_value(row).unwrap_or_else(|_| json!({}));
    if let Value::Object(map) = &mut body {
        map.insert("user_id".to_string(), json!(user_id));
    }
    body
}

impl RemoteMirror for RestMirror {
    fn apply(&self, user_id: &str, event: &MirrorEvent) -> Result<(), MirrorError> {
        let table = event.table();
        let body = event_body(user_id, event);

        match event {
            MirrorEvent::UpsertStats(_) => {
                self.post(table, &self.table_url(table, Some("user_id")), true, &body)
            }
            MirrorEvent::SaveAchievement { .. } => self.post(
                table,
                &self.table_url(table, Some("user_id,achievement_id")),
                true,
                &body,
            ),
            MirrorEvent::SaveDailyProgress(_) => {
                self.post(table, &self.table_url(table, Some("user_id,date")), true, &body)
            }
            MirrorEvent::RecordActivity(_) => {
                self.post(table, &self.table_url(table, None), false, &body)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mirror::{ActivityKind, ActivityRecord, DailyProgress, StatsSnapshot};

    #[test]
    fn test_table_urls() {
        let mirror = RestMirror::new("https://example.test/", "key", Duration::from_secs(5));
        assert_eq!(
            mirror.table_url("user_stats", Some("user_id")),
            "https://example.test/rest/v1/user_stats?on_conflict=user_id"
        );
        assert_eq!(
            mirror.table_url("activity_feed", None),
            "https://example.test/rest/v1/activity_feed"
        );
    }

    #[test]
    fn test_stats_body() {
        let event = MirrorEvent::UpsertStats(StatsSnapshot {
            current_day: 5,
            current_streak: 5,
            best_streak: 9,
            total_completions: 12,
            total_failures: 2,
            last_updated: "2026-06-01".into(),
        });
        let body = event_body("user-1", &event);
        assert_eq!(body["user_id"], "user-1");
        assert_eq!(body["best_streak"], 9);
        assert_eq!(body["total_failures"], 2);
        assert!(body["updated_at"].is_string());
    }

    #[test]
    fn test_activity_body_carries_user() {
        let event = MirrorEvent::RecordActivity(
            ActivityRecord::new(ActivityKind::Achievement, 7).with_achievement("week_warrior"),
        );
        let body = event_body("user-1", &event);
        assert_eq!(body["user_id"], "user-1");
        assert_eq!(body["activity_type"], "achievement");
        assert_eq!(body["achievement_id"], "week_warrior");
    }

    #[test]
    fn test_daily_progress_body() {
        let event = MirrorEvent::SaveDailyProgress(DailyProgress {
            date: "2026-06-01".into(),
            day_number: 4,
            completed: true,
            failed: false,
            notes: String::new(),
            rules_completed: vec![true, true, false],
        });
        let body = event_body("user-1", &event);
        assert_eq!(body["user_id"], "user-1");
        assert_eq!(body["date"], "2026-06-01");
        assert_eq!(body["rules_completed"], json!([true, true, false]));
        assert_eq!(event.table(), "daily_progress");
    }

    #[test]
    fn test_unreachable_remote_is_a_transport_error() {
        let mirror = RestMirror::new("http://127.0.0.1:9", "key", Duration::from_millis(200));
        let err = mirror
            .apply(
                "user-1",
                &MirrorEvent::SaveAchievement {
                    achievement_id: "first_day".into(),
                    day_unlocked: 1,
                },
            )
            .unwrap_err();
        assert!(matches!(err, MirrorError::Transport { table: "user_achievements", .. }));
    }
}
