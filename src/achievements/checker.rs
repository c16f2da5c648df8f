//! Achievement threshold checks

use super::definitions::{Achievement, ACHIEVEMENTS};

/// Achievements whose threshold lies in `(previous_day, current_day]`.
///
/// Works for jumps of any size; a decrease or no change yields nothing.
pub fn check_new_achievements(previous_day: u32, current_day: u32) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| previous_day < a.requirement && a.requirement <= current_day)
        .collect()
}

/// Achievements reached at `day`
pub fn unlocked_for(day: u32) -> Vec<&'static Achievement> {
    ACHIEVEMENTS.iter().filter(|a| day >= a.requirement).collect()
}

/// Achievements not yet reached at `day`
pub fn locked_for(day: u32) -> Vec<&'static Achievement> {
    ACHIEVEMENTS.iter().filter(|a| day < a.requirement).collect()
}

/// The next badge to aim for, if any remain
pub fn next_for(day: u32) -> Option<&'static Achievement> {
    ACHIEVEMENTS.iter().find(|a| day < a.requirement)
}
