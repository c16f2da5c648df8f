//! Habit list commands

use anyhow::{bail, Result};

use sixtysix::challenge::{Difficulty, HabitTemplate};

use super::session::{saved, Session};

/// Show the current habit list
pub fn list_command(session: &Session) -> Result<()> {
    let habits = session.tracker.habits();
    let max = session.subscription().max_habits();

    println!("Habits ({}/{} allowed on your plan):", habits.len(), max);
    for habit in &habits {
        println!("  {}. {}", habit.id, habit.text);
    }

    println!("\nPresets:");
    for level in Difficulty::all() {
        println!(
            "  {:<8} {} ({} habits)",
            level.as_str(),
            level.description(),
            level.habits().len()
        );
    }
    Ok(())
}

/// Replace the habit list
pub fn set_command(session: &mut Session, habits: &[String]) -> Result<()> {
    let subscription = session.subscription();
    let habits = saved(session.tracker.set_habits(habits, &subscription)?);
    print_set(&habits);
    Ok(())
}

/// Use a preset list
pub fn preset_command(session: &mut Session, level: &str) -> Result<()> {
    let Some(difficulty) = Difficulty::from_str(level) else {
        bail!("Unknown preset '{}' (expected medium, hard or extreme)", level);
    };

    let subscription = session.subscription();
    let texts: Vec<String> = difficulty.habits().iter().map(|text| text.to_string()).collect();
    if texts.len() > subscription.max_habits() {
        bail!(
            "The {} preset has {} habits but your plan allows {}. Try `sixtysix plan trial`.",
            difficulty.label(),
            texts.len(),
            subscription.max_habits()
        );
    }

    let habits = saved(session.tracker.set_habits(&texts, &subscription)?);
    println!("{} preset selected.", difficulty.label());
    print_set(&habits);
    Ok(())
}

fn print_set(habits: &[HabitTemplate]) {
    println!("Habit list updated:");
    for habit in habits {
        println!("  {}. {}", habit.id, habit.text);
    }
}
