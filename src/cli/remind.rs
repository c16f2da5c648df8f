//! Daily reminder commands

use anyhow::{Context, Result};

use sixtysix::reminder::pick_line;

use super::session::Session;

/// Enable the reminder at `hour:minute` (config defaults when omitted)
pub fn set_command(session: &Session, hour: Option<u32>, minute: Option<u32>) -> Result<()> {
    let defaults = &session.config.reminder;
    let hour = hour.unwrap_or(defaults.hour);
    let minute = minute.unwrap_or(defaults.minute);

    let persistence = session.persistence();
    let mut settings = persistence.reminder();
    settings.schedule(hour, minute)?;
    persistence
        .save_reminder(&settings)
        .context("Failed to save reminder settings")?;

    println!("Daily reminder set for {:02}:{:02}.", hour, minute);
    Ok(())
}

pub fn off_command(session: &Session) -> Result<()> {
    let persistence = session.persistence();
    let mut settings = persistence.reminder();
    settings.disable();
    persistence
        .save_reminder(&settings)
        .context("Failed to save reminder settings")?;

    println!("Daily reminder off.");
    Ok(())
}

/// Print the reminder once per day after its time, while habits are open
pub fn check_command(session: &Session) -> Result<()> {
    let persistence = session.persistence();
    let mut settings = persistence.reminder();
    let now = session.now();

    if !settings.due(now) {
        tracing::debug!("Reminder not due");
        return Ok(());
    }

    let state = session.tracker.state();
    if !state.all_rules_completed() {
        println!("{}", pick_line());
        println!(
            "Day {}: {}/{} habits done.",
            state.current_day,
            state.completed_rules(),
            state.today_rules.len()
        );
    }

    settings.mark_shown(now.date());
    persistence
        .save_reminder(&settings)
        .context("Failed to save reminder settings")?;
    Ok(())
}
