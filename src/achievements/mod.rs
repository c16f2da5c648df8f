//! Day-count badges: definitions, threshold checks and the unlock ledger

mod checker;
mod definitions;
mod ledger;

pub use checker::{check_new_achievements, locked_for, next_for, unlocked_for};
pub use definitions::{Achievement, AchievementId, ACHIEVEMENTS};
pub use ledger::{AchievementLedger, UserAchievement};
