//! Challenge data model: state record, habit checklist and history log

mod habit;
mod history;
mod state;

pub use habit::{
    default_habits, validate_habits, Difficulty, HabitError, HabitRule, HabitTemplate,
    DEFAULT_HABITS,
};
pub use history::{day_key, DayEntry, DATE_FORMAT};
pub use state::{fresh_checklist, ChallengeState, CHALLENGE_LENGTH, DEFAULT_BEDTIME};
