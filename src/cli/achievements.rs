//! Achievements command implementation

use anyhow::Result;

use sixtysix::achievements::ACHIEVEMENTS;

use super::session::Session;

/// List unlocked and upcoming achievements
pub fn achievements_command(session: &Session) -> Result<()> {
    let ledger = session.tracker.achievements();
    let streak = session.tracker.state().completed_streak();

    println!("Achievements ({}/{}):\n", ledger.len(), ACHIEVEMENTS.len());

    for achievement in ACHIEVEMENTS {
        match ledger.get(achievement.id) {
            Some(unlocked) => println!(
                "  [x] {:<20} {} (day {}, {})",
                achievement.name, achievement.description, unlocked.day_unlocked, unlocked.unlocked_at
            ),
            None => {
                let remaining = achievement.requirement.saturating_sub(streak);
                println!(
                    "  [ ] {:<20} {} ({} to go)",
                    achievement.name, achievement.description, remaining
                );
            }
        }
    }

    Ok(())
}
