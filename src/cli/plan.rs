//! Subscription plan commands

use anyhow::{bail, Context, Result};

use sixtysix::subscription::{parse_period, purchase, start_trial, Feature, Tier};

use super::session::Session;

/// Show the active plan and its limits
pub fn show_command(session: &Session) -> Result<()> {
    let subscription = session.subscription();

    print!("Plan: {}", subscription.tier.as_str());
    if subscription.is_trial_active {
        if let Some(ends) = subscription.trial_ends_at {
            print!(" (trial until {})", ends.format("%Y-%m-%d"));
        }
    } else if let Some(period) = subscription.period {
        print!(" ({}", period.as_str());
        match subscription.expires_at {
            Some(expires) => print!(", renews {})", expires.format("%Y-%m-%d")),
            None => print!(")"),
        }
    }
    println!();

    println!("  Habits allowed: {}", subscription.max_habits());
    for feature in Feature::all() {
        let mark = if subscription.can_access(*feature) { "x" } else { " " };
        println!("  [{}] {}", mark, feature.label());
    }
    Ok(())
}

/// Start a free trial
pub fn trial_command(session: &Session, days: u32) -> Result<()> {
    let persistence = session.persistence();
    if persistence.trial().is_some() {
        bail!("A trial was already used on this device");
    }
    if session.subscription().tier == Tier::Pro {
        bail!("You already have Pro");
    }

    let trial = start_trial(days, session.now_utc());
    persistence
        .save_trial(&trial)
        .context("Failed to save trial")?;
    println!("Pro trial active until {}.", trial.ends_at.format("%Y-%m-%d"));
    Ok(())
}

/// Record a purchase
pub fn purchase_command(session: &Session, period: &str) -> Result<()> {
    let period = parse_period(period)?;
    let subscription = purchase(period, session.now_utc());

    session
        .persistence()
        .save_subscription(&subscription)
        .context("Failed to save subscription")?;

    match subscription.expires_at {
        Some(expires) => println!(
            "Pro ({}) active until {}.",
            period.as_str(),
            expires.format("%Y-%m-%d")
        ),
        None => println!("Pro (lifetime) active. Thanks for the support!"),
    }
    Ok(())
}
