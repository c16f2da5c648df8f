//! Workout photo commands

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use sixtysix::challenge::DATE_FORMAT;
use sixtysix::subscription::Feature;

use super::session::{saved, Session};

/// Attach a photo payload (a data URL or file path) to `date` or today
pub fn set_command(session: &mut Session, payload: &str, date: Option<&str>) -> Result<()> {
    if payload.trim().is_empty() {
        bail!("Photo payload is empty");
    }
    let date = date.map(parse_date).transpose()?;

    let stored = saved(session.tracker.save_workout_photo(date, payload)?);
    println!("Photo saved for {}.", stored);
    Ok(())
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw))
}

/// List days with a photo
pub fn list_command(session: &Session) -> Result<()> {
    if !session.subscription().can_access(Feature::PhotoGallery) {
        bail!("The photo gallery is a Pro feature. Try `sixtysix plan trial`.");
    }

    let photos = session.persistence().all_workout_photos();
    if photos.is_empty() {
        println!("No workout photos yet.");
        return Ok(());
    }

    for (date, payload) in &photos {
        println!("{}  {} bytes", date, payload.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2026-03-09 ").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
        );
        assert!(parse_date("09/03/2026").is_err());
        assert!(parse_date("2026-02-30").is_err());
    }
}
