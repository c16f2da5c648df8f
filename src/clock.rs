//! Time source for day-rollover decisions
//!
//! The tracker never reads the system clock directly; it asks a [`Clock`].

use std::sync::Mutex;

use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Source of "now" in local wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// The same instant as [`Clock::now`], for absolute timestamps such as
    /// trial and plan expiry. A local time skipped by a DST jump is read as
    /// UTC.
    fn now_utc(&self) -> DateTime<Utc> {
        let local = self.now();
        match Local.from_local_datetime(&local).earliest() {
            Some(at) => at.with_timezone(&Utc),
            None => local.and_utc(),
        }
    }
}

/// The machine's local clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Noon on the given date
    pub fn on(date: NaiveDate) -> Self {
        Self::new(date.and_hms_opt(12, 0, 0).unwrap_or_default())
    }

    pub fn advance_days(&self, days: u64) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(next) = now.checked_add_days(Days::new(days)) {
            *now = next;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap());
        clock.advance_days(1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2027, 1, 1).unwrap());
    }

    #[test]
    fn test_utc_follows_fixed_clock() {
        let clock = FixedClock::on(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        let before = clock.now_utc();
        clock.advance_days(3);
        assert_eq!(clock.now_utc() - before, chrono::Duration::days(3));
    }
}
