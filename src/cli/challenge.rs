//! Daily challenge commands

use anyhow::{bail, Result};
use chrono::NaiveTime;

use sixtysix::achievements::next_for;
use sixtysix::challenge::CHALLENGE_LENGTH;

use super::session::{saved, Session};

/// Show today's checklist and challenge progress
pub fn status_command(session: &Session) -> Result<()> {
    let state = session.tracker.state();

    if !state.onboarded {
        println!("Welcome! Run `sixtysix onboard --bedtime HH:MM` to get started.\n");
    }

    println!(
        "Day {} of {}  (best streak {}, {} failures)",
        state.current_day.min(CHALLENGE_LENGTH),
        CHALLENGE_LENGTH,
        state.best_streak,
        state.failure_count
    );
    if state.current_day > CHALLENGE_LENGTH {
        println!("Challenge finished! Keep the streak going.");
    } else {
        println!("{} days to go", state.days_remaining());
    }
    println!("Bedtime {}\n", state.bedtime);

    println!(
        "Habits ({}/{}):",
        state.completed_rules(),
        state.today_rules.len()
    );
    for rule in &state.today_rules {
        let mark = if rule.completed { "x" } else { " " };
        println!("  [{}] {}. {}", mark, rule.id, rule.text);
    }

    if !state.today_notes.is_empty() {
        println!("\nNotes: {}", state.today_notes);
    }

    if let Some(next) = next_for(state.completed_streak()) {
        let days = next.requirement - state.completed_streak();
        println!(
            "\nNext achievement: {} in {} day{}",
            next.name,
            days,
            if days == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

pub fn toggle_command(session: &mut Session, id: u32) -> Result<()> {
    let completed = saved(session.tracker.toggle_rule(id)?);
    let state = session.tracker.state();

    println!(
        "{} {} ({}/{})",
        if completed { "Checked" } else { "Unchecked" },
        id,
        state.completed_rules(),
        state.today_rules.len()
    );
    if state.all_rules_completed() {
        println!("Every habit is done. Run `sixtysix complete` to lock in the day.");
    }
    Ok(())
}

pub fn complete_command(session: &mut Session) -> Result<()> {
    if !session.tracker.state().all_rules_completed() {
        println!("Not every habit is checked, completing anyway.");
    }

    let achievements = saved(session.tracker.complete_day()?);
    let state = session.tracker.state();

    println!(
        "Day complete! You're on day {} (best streak {}).",
        state.current_day, state.best_streak
    );
    for achievement in achievements {
        println!(
            "Achievement unlocked: {} - {}",
            achievement.name, achievement.description
        );
    }
    Ok(())
}

pub fn fail_command(session: &mut Session) -> Result<()> {
    let day = session.tracker.state().current_day;
    saved(session.tracker.fail_day()?);

    println!(
        "Day {} failed. Back to day 1 ({} failures so far).",
        day,
        session.tracker.state().failure_count
    );
    Ok(())
}

pub fn notes_command(session: &mut Session, text: &str) -> Result<()> {
    saved(session.tracker.update_notes(text));
    println!("Notes updated.");
    Ok(())
}

pub fn save_note_command(session: &mut Session) -> Result<()> {
    if saved(session.tracker.save_note()) {
        println!("Note saved to history.");
    } else {
        println!("Nothing to save, today's notes are empty.");
    }
    Ok(())
}

pub fn bedtime_command(session: &mut Session, time: Option<&str>) -> Result<()> {
    let Some(time) = time else {
        println!("Bedtime {}", session.tracker.state().bedtime);
        return Ok(());
    };

    let bedtime = parse_bedtime(time)?;
    saved(session.tracker.update_bedtime(&bedtime));
    println!("Bedtime set to {}", bedtime);
    Ok(())
}

pub fn onboard_command(session: &mut Session, bedtime: &str) -> Result<()> {
    let bedtime = parse_bedtime(bedtime)?;
    saved(session.tracker.complete_onboarding(&bedtime));

    println!("You're in. 66 days starts now.");
    println!("Bedtime {}. Check your habits with `sixtysix status`.", bedtime);
    Ok(())
}

pub fn reset_command(session: &mut Session, yes: bool) -> Result<()> {
    if !yes {
        bail!("This wipes your progress and history. Re-run with --yes to confirm.");
    }

    saved(session.tracker.reset_all());
    println!("Challenge reset. Day 1 starts today.");
    Ok(())
}

pub fn history_command(session: &Session, limit: Option<usize>) -> Result<()> {
    let history = &session.tracker.state().history;
    if history.is_empty() {
        println!("No history yet.");
        return Ok(());
    }

    let limit = limit.unwrap_or(history.len());
    for entry in history.iter().rev().take(limit) {
        let status = if entry.is_saved_note() {
            "note"
        } else if entry.completed {
            "done"
        } else {
            "failed"
        };

        let photo = if entry.workout_photo.is_some() { " [photo]" } else { "" };
        match &entry.notes {
            Some(notes) => println!("{:<20} {:<6}{} {}", entry.date, status, photo, notes),
            None => println!("{:<20} {:<6}{}", entry.date, status, photo),
        }
    }
    Ok(())
}

/// Normalize an HH:MM bedtime
fn parse_bedtime(input: &str) -> Result<String> {
    match NaiveTime::parse_from_str(input.trim(), "%H:%M") {
        Ok(time) => Ok(time.format("%H:%M").to_string()),
        Err(_) => bail!("Invalid bedtime '{}', expected HH:MM", input),
    }
}
