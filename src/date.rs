//! Synthetic commit dates.
//!
//! A date is `today + 1 day + weeks + days`, computed on local wall-clock
//! time, then moved back into the year of `today`.

use crate::error::{PulseError, Result};
use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone};
use rand::Rng;
use std::fmt::Display;

pub const MAX_WEEKS: u32 = 54;
pub const MAX_DAYS: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offsets {
    pub weeks: u32,
    pub days: u32,
}

impl Offsets {
    pub fn new(weeks: u32, days: u32) -> Self {
        Self { weeks, days }
    }

    /// Draw weeks from `[0, 54]` and days from `[0, 6]`, independently.
    pub fn draw<R: Rng>(rng: &mut R) -> Self {
        Self {
            weeks: rng.gen_range(0..=MAX_WEEKS),
            days: rng.gen_range(0..=MAX_DAYS),
        }
    }

    fn span(&self) -> Days {
        Days::new(u64::from(self.weeks) * 7 + u64::from(self.days))
    }
}

/// `today + 1 day + offsets`, before any year adjustment.
pub fn candidate(today: NaiveDateTime, offsets: Offsets) -> Result<NaiveDateTime> {
    today
        .checked_add_days(Days::new(1))
        .and_then(|base| base.checked_add_days(offsets.span()))
        .ok_or_else(|| PulseError::InvalidDate(format!("{today} + {offsets:?} overflows")))
}

/// Replace the year field only. Feb 29 clamps to Feb 28 in a non-leap year.
pub fn override_year(dt: NaiveDateTime, year: i32) -> Result<NaiveDateTime> {
    dt.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, dt.month(), 28).map(|d| d.and_time(dt.time())))
        .ok_or_else(|| PulseError::InvalidDate(format!("cannot move {dt} into year {year}")))
}

fn localize<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Result<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        // DST gap: the wall-clock time does not exist, step past it
        LocalResult::None => naive
            .checked_add_signed(Duration::hours(1))
            .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
            .ok_or_else(|| PulseError::InvalidDate(format!("{naive} does not exist locally"))),
    }
}

/// Build the commit date for one iteration.
pub fn synthesize<Tz: TimeZone>(today: &DateTime<Tz>, offsets: Offsets) -> Result<DateTime<Tz>> {
    let local = today.naive_local();
    let shifted = candidate(local, offsets)?;
    let clamped = override_year(shifted, local.year())?;
    localize(&today.timezone(), clamped)
}

/// RFC3339 with whole seconds and a numeric offset, e.g. `2025-06-16T10:00:00+02:00`.
pub fn format_date<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    dt.to_rfc3339_opts(SecondsFormat::Secs, false)
}
