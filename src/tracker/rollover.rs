//! Implicit conclusion of a stale day
//!
//! When state is loaded on a later date than it was last evaluated for, the
//! stale day is settled from its checklist:
//!
//! | checklist          | current day | outcome                          |
//! |--------------------|-------------|----------------------------------|
//! | non-empty, all done| any         | completed on the stale date      |
//! | incomplete         | > 1         | failed on the stale date         |
//! | incomplete         | 1           | lapsed: nothing recorded         |
//!
//! In every case the checklist is reset and the state is marked as
//! evaluated for today. A gap of several days settles the stale date only.

use chrono::NaiveDate;

use super::transitions::{conclude_failure, conclude_success, start_next_day};
use crate::achievements::Achievement;
use crate::challenge::{day_key, ChallengeState, HabitTemplate};
use crate::store::PhotoMap;

/// What a rollover did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolloverKind {
    /// State was already current
    None,
    /// The stale day had every habit checked
    Completed {
        date: NaiveDate,
        achievements: Vec<&'static Achievement>,
    },
    /// The stale day was incomplete past day 1
    Failed { date: NaiveDate, failed_day: u32 },
    /// The stale day was an incomplete day 1; only the checklist was reset
    Lapsed { date: NaiveDate },
}

impl RolloverKind {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Settle the day `state` was last evaluated for, if it lies before `today`
pub fn evaluate_rollover(
    state: &mut ChallengeState,
    today: NaiveDate,
    habits: &[HabitTemplate],
    photos: &PhotoMap,
) -> RolloverKind {
    if state.last_updated >= today {
        return RolloverKind::None;
    }

    let stale = state.last_updated;
    let photo = photos.get(&day_key(stale)).cloned();

    let kind = if state.all_rules_completed() {
        let achievements = conclude_success(state, stale, photo);
        tracing::info!("Day {} completed on rollover, now on day {}", stale, state.current_day);
        RolloverKind::Completed {
            date: stale,
            achievements,
        }
    } else if state.current_day > 1 {
        let failed_day = state.current_day;
        conclude_failure(state, stale, photo);
        tracing::info!("Day {} incomplete on rollover, back to day 1", stale);
        RolloverKind::Failed {
            date: stale,
            failed_day,
        }
    } else {
        tracing::debug!("Day 1 lapsed on {}, checklist reset", stale);
        RolloverKind::Lapsed { date: stale }
    };

    start_next_day(state, habits, today);
    kind
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;
    use crate::challenge::default_habits;
    use crate::tracker::transitions::fail_day;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 7, d).unwrap()
    }

    fn state_on(d: u32, current_day: u32, checked: usize) -> ChallengeState {
        let mut state = ChallengeState::initial(date(d), &default_habits());
        state.current_day = current_day;
        state.best_streak = current_day;
        for rule in state.today_rules.iter_mut().take(checked) {
            rule.completed = true;
        }
        state
    }

    #[test]
    fn test_same_day_is_untouched() {
        let mut state = state_on(10, 4, 2);
        let before = state.clone();
        let kind = evaluate_rollover(&mut state, date(10), &default_habits(), &PhotoMap::new());
        assert!(kind.is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn test_future_last_updated_is_untouched() {
        // complete_day leaves last_updated on tomorrow
        let mut state = state_on(11, 4, 0);
        let kind = evaluate_rollover(&mut state, date(10), &default_habits(), &PhotoMap::new());
        assert!(kind.is_none());
        assert_eq!(state.last_updated, date(11));
    }

    #[test]
    fn test_all_checked_completes_stale_day() {
        let mut state = state_on(10, 7, 3);
        let mut photos = PhotoMap::new();
        photos.insert("2026-07-10".into(), "img".into());

        let kind = evaluate_rollover(&mut state, date(11), &default_habits(), &photos);

        match kind {
            RolloverKind::Completed { date: d, achievements } => {
                assert_eq!(d, date(10));
                assert_eq!(achievements.len(), 1);
                assert_eq!(achievements[0].id, AchievementId::WeekWarrior);
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert_eq!(state.current_day, 8);
        assert_eq!(state.best_streak, 8);
        assert_eq!(state.history[0].date, "2026-07-10");
        assert_eq!(state.history[0].workout_photo.as_deref(), Some("img"));
        assert_eq!(state.completed_rules(), 0);
        assert_eq!(state.last_updated, date(11));
    }

    #[test]
    fn test_incomplete_day_one_lapses_quietly() {
        let mut state = state_on(10, 1, 2);
        state.today_notes = "almost".into();

        let kind = evaluate_rollover(&mut state, date(11), &default_habits(), &PhotoMap::new());

        assert_eq!(kind, RolloverKind::Lapsed { date: date(10) });
        assert!(state.history.is_empty());
        assert_eq!(state.failure_count, 0);
        assert_eq!(state.current_day, 1);
        assert_eq!(state.completed_rules(), 0);
        assert!(state.today_notes.is_empty());
        assert_eq!(state.last_updated, date(11));
    }

    #[test]
    fn test_incomplete_later_day_matches_explicit_fail() {
        let mut implicit = state_on(10, 5, 1);
        implicit.today_notes = "skipped".into();
        let mut explicit = implicit.clone();

        let kind = evaluate_rollover(&mut implicit, date(11), &default_habits(), &PhotoMap::new());
        fail_day(&mut explicit, date(10), &default_habits(), None);

        assert_eq!(
            kind,
            RolloverKind::Failed {
                date: date(10),
                failed_day: 5
            }
        );
        assert_eq!(implicit.history, explicit.history);
        assert_eq!(implicit.current_day, explicit.current_day);
        assert_eq!(implicit.failure_count, explicit.failure_count);
        assert_eq!(implicit.today_rules, explicit.today_rules);
        assert_eq!(implicit.last_updated, explicit.last_updated);
    }

    #[test]
    fn test_multi_day_gap_settles_stale_date_once() {
        let mut state = state_on(10, 3, 3);
        let kind = evaluate_rollover(&mut state, date(15), &default_habits(), &PhotoMap::new());

        assert!(matches!(kind, RolloverKind::Completed { .. }));
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.current_day, 4);
        assert_eq!(state.last_updated, date(15));
    }

    #[test]
    fn test_checklist_is_rebuilt_from_current_habits() {
        let mut state = state_on(10, 1, 0);
        let habits = crate::challenge::HabitTemplate::from_texts(["Stretch"]);
        evaluate_rollover(&mut state, date(11), &habits, &PhotoMap::new());
        assert_eq!(state.today_rules.len(), 1);
        assert_eq!(state.today_rules[0].text, "Stretch");
    }
}
