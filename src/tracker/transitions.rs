//! State transitions for user actions
//!
//! No I/O happens here: the date, habit list and photo are passed in.

use chrono::{NaiveDate, NaiveDateTime};

use super::TrackerError;
use crate::achievements::{check_new_achievements, Achievement};
use crate::challenge::{fresh_checklist, ChallengeState, DayEntry, HabitRule, HabitTemplate};

/// Flip one checklist entry. Returns its new `completed` value.
pub fn toggle_rule(state: &mut ChallengeState, rule_id: u32) -> Result<bool, TrackerError> {
    let rule = state
        .today_rules
        .iter_mut()
        .find(|rule| rule.id == rule_id)
        .ok_or(TrackerError::UnknownRule(rule_id))?;
    rule.completed = !rule.completed;
    Ok(rule.completed)
}

/// Conclude `date` as a success, whatever the checklist says.
///
/// The next day to evaluate becomes the day after `date`. Returns the
/// achievements whose threshold the completed streak just crossed.
pub fn complete_day(
    state: &mut ChallengeState,
    date: NaiveDate,
    habits: &[HabitTemplate],
    workout_photo: Option<String>,
) -> Vec<&'static Achievement> {
    let achievements = conclude_success(state, date, workout_photo);
    start_next_day(state, habits, next_day(date));
    achievements
}

/// Conclude `date` as a failure: back to day 1
pub fn fail_day(
    state: &mut ChallengeState,
    date: NaiveDate,
    habits: &[HabitTemplate],
    workout_photo: Option<String>,
) {
    conclude_failure(state, date, workout_photo);
    start_next_day(state, habits, next_day(date));
}

pub fn update_notes(state: &mut ChallengeState, notes: &str) {
    state.today_notes = notes.to_string();
}

pub fn update_bedtime(state: &mut ChallengeState, bedtime: &str) {
    state.bedtime = bedtime.to_string();
}

pub fn complete_onboarding(state: &mut ChallengeState, bedtime: &str) {
    state.bedtime = bedtime.to_string();
    state.onboarded = true;
}

/// Start over from day 1, keeping the user past onboarding
pub fn reset_all(today: NaiveDate, habits: &[HabitTemplate]) -> ChallengeState {
    ChallengeState {
        onboarded: true,
        ..ChallengeState::initial(today, habits)
    }
}

/// Rebuild the checklist from `habits`, keeping ticks on habits whose text
/// is unchanged
pub fn reload_habits(state: &mut ChallengeState, habits: &[HabitTemplate]) {
    state.today_rules = habits
        .iter()
        .map(|habit| HabitRule {
            id: habit.id,
            text: habit.text.clone(),
            completed: state
                .today_rules
                .iter()
                .any(|rule| rule.text == habit.text && rule.completed),
        })
        .collect();
}

/// Move today's notes into the history as a saved note.
///
/// Returns false (and changes nothing) when the notes are blank.
pub fn save_note(state: &mut ChallengeState, now: NaiveDateTime) -> bool {
    if state.today_notes.trim().is_empty() {
        return false;
    }
    let timestamp = now.format("%Y-%m-%dT%H:%M:%S").to_string();
    state
        .history
        .push(DayEntry::saved_note(timestamp, &state.today_notes));
    state.today_notes.clear();
    true
}

pub(super) fn conclude_success(
    state: &mut ChallengeState,
    date: NaiveDate,
    workout_photo: Option<String>,
) -> Vec<&'static Achievement> {
    let previous_streak = state.completed_streak();
    state
        .history
        .push(DayEntry::completed(date, &state.today_notes, workout_photo));
    state.current_day += 1;
    state.best_streak = state.best_streak.max(state.current_day);
    check_new_achievements(previous_streak, state.completed_streak())
}

pub(super) fn conclude_failure(
    state: &mut ChallengeState,
    date: NaiveDate,
    workout_photo: Option<String>,
) {
    state
        .history
        .push(DayEntry::failed(date, &state.today_notes, workout_photo));
    state.current_day = 1;
    state.failure_count += 1;
}

/// Fresh checklist and notes, evaluated next on `next`
pub(super) fn start_next_day(state: &mut ChallengeState, habits: &[HabitTemplate], next: NaiveDate) {
    state.today_rules = fresh_checklist(habits);
    state.today_notes.clear();
    state.last_updated = next;
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::AchievementId;
    use crate::challenge::default_habits;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap() + chrono::Days::new(u64::from(n))
    }

    fn checked_state() -> ChallengeState {
        let mut state = ChallengeState::initial(day(0), &default_habits());
        for rule in &mut state.today_rules {
            rule.completed = true;
        }
        state
    }

    #[test]
    fn test_toggle_flips_one_rule() {
        let mut state = ChallengeState::initial(day(0), &default_habits());
        assert_eq!(toggle_rule(&mut state, 2), Ok(true));
        assert_eq!(state.completed_rules(), 1);
        assert!(state.today_rules[1].completed);
        assert_eq!(toggle_rule(&mut state, 2), Ok(false));
        assert_eq!(state.current_day, 1);
    }

    #[test]
    fn test_toggle_unknown_rule() {
        let mut state = ChallengeState::initial(day(0), &default_habits());
        assert_eq!(toggle_rule(&mut state, 42), Err(TrackerError::UnknownRule(42)));
    }

    #[test]
    fn test_complete_day() {
        let mut state = checked_state();
        state.current_day = 4;
        state.best_streak = 9;
        state.today_notes = "solid".into();

        let achievements = complete_day(&mut state, day(0), &default_habits(), None);

        assert!(achievements.is_empty());
        assert_eq!(state.current_day, 5);
        assert_eq!(state.best_streak, 9);
        assert_eq!(state.history.len(), 1);
        assert!(state.history[0].completed && !state.history[0].failed);
        assert_eq!(state.history[0].notes.as_deref(), Some("solid"));
        assert_eq!(state.completed_rules(), 0);
        assert!(state.today_notes.is_empty());
        assert_eq!(state.last_updated, day(1));
    }

    #[test]
    fn test_complete_day_ignores_checklist() {
        let mut state = ChallengeState::initial(day(0), &default_habits());
        let achievements = complete_day(&mut state, day(0), &default_habits(), None);
        assert_eq!(state.current_day, 2);
        assert_eq!(state.best_streak, 2);
        assert_eq!(achievements.len(), 1);
        assert_eq!(achievements[0].id, AchievementId::FirstDay);
    }

    #[test]
    fn test_fail_day() {
        let mut state = checked_state();
        state.current_day = 5;
        state.best_streak = 5;

        fail_day(&mut state, day(0), &default_habits(), Some("photo".into()));

        assert_eq!(state.current_day, 1);
        assert_eq!(state.failure_count, 1);
        assert_eq!(state.best_streak, 5);
        assert_eq!(state.history.len(), 1);
        assert!(state.history[0].failed && !state.history[0].completed);
        assert_eq!(state.history[0].workout_photo.as_deref(), Some("photo"));
        assert_eq!(state.completed_rules(), 0);
        assert_eq!(state.last_updated, day(1));
    }

    #[test]
    fn test_reset_all_keeps_onboarding() {
        let state = reset_all(day(3), &default_habits());
        assert!(state.onboarded);
        assert_eq!(state.current_day, 1);
        assert_eq!(state.failure_count, 0);
        assert_eq!(state.last_updated, day(3));
    }

    #[test]
    fn test_reload_habits_preserves_ticks_by_text() {
        let mut state = ChallengeState::initial(day(0), &default_habits());
        toggle_rule(&mut state, 2).unwrap(); // Read 10 Pages

        let habits = HabitTemplate::from_texts(["Read 10 Pages", "Cold Shower"]);
        reload_habits(&mut state, &habits);

        assert_eq!(state.today_rules.len(), 2);
        assert_eq!(state.today_rules[0].id, 1);
        assert!(state.today_rules[0].completed);
        assert!(!state.today_rules[1].completed);
    }

    #[test]
    fn test_save_note() {
        let mut state = ChallengeState::initial(day(0), &default_habits());
        let now = day(0).and_hms_opt(18, 5, 0).unwrap();

        update_notes(&mut state, "   ");
        assert!(!save_note(&mut state, now));
        assert!(state.history.is_empty());

        update_notes(&mut state, "Ran in the rain");
        assert!(save_note(&mut state, now));
        assert!(state.today_notes.is_empty());
        assert_eq!(state.history[0].date, "2026-03-01T18:05:00");
        assert!(state.history[0].is_saved_note());
        assert_eq!(state.total_completions(), 0);
    }

    #[test]
    fn test_onboarding_and_bedtime() {
        let mut state = ChallengeState::initial(day(0), &default_habits());
        complete_onboarding(&mut state, "23:15");
        assert!(state.onboarded);
        assert_eq!(state.bedtime, "23:15");
        update_bedtime(&mut state, "21:45");
        assert_eq!(state.bedtime, "21:45");
    }
}
