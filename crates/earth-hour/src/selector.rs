//! Which year's occurrence a query is about.
//!
//! Three policies with different boundaries:
//!
//! | Function | Rolls to next year when |
//! |---|---|
//! | [`active_window_occurrence`] | never (always the zone's current year) |
//! | [`upcoming_occurrence`] | `now >= end` |
//! | [`reminder_year`] | `now >= start` |
//!
//! The calendar year is always read in the event zone, not in UTC.

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

use crate::error::Result;
use crate::instant::parse_timezone;
use crate::recurrence::{occurrence_in, start_in, Occurrence};

/// This calendar year's occurrence, whether `now` is before, during, or after it.
///
/// Point-in-time checks use this so that the window check during 20:30–21:30
/// and the day check for the rest of the evening both see the current year.
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidZone`](crate::EarthHourError::InvalidZone)
/// if the timezone cannot be resolved.
pub fn active_window_occurrence(now: DateTime<Utc>, timezone: &str) -> Result<Occurrence> {
    active_window_in(now, &parse_timezone(timezone)?)
}

/// The occurrence a countdown should target.
///
/// This year's occurrence while `now` is strictly before its end; next year's
/// once `now >= end`. During the active window the start is already in the
/// past while the end is still ahead, both on the same occurrence.
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidZone`](crate::EarthHourError::InvalidZone)
/// if the timezone cannot be resolved.
pub fn upcoming_occurrence(now: DateTime<Utc>, timezone: &str) -> Result<Occurrence> {
    upcoming_in(now, &parse_timezone(timezone)?)
}

/// The year whose reminders are pending at `now`.
///
/// The current year while `now` is strictly before this year's start, the
/// next year from the start instant on. Reminders only look ahead to the
/// start, so this rolls one hour earlier than [`upcoming_occurrence`].
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidZone`](crate::EarthHourError::InvalidZone)
/// if the timezone cannot be resolved.
pub fn reminder_year(now: DateTime<Utc>, timezone: &str) -> Result<i32> {
    reminder_year_in(now, &parse_timezone(timezone)?)
}

pub(crate) fn current_year(now: DateTime<Utc>, tz: &Tz) -> i32 {
    now.with_timezone(tz).year()
}

pub(crate) fn active_window_in(now: DateTime<Utc>, tz: &Tz) -> Result<Occurrence> {
    occurrence_in(current_year(now, tz), tz)
}

pub(crate) fn upcoming_in(now: DateTime<Utc>, tz: &Tz) -> Result<Occurrence> {
    let year = current_year(now, tz);
    let this_year = occurrence_in(year, tz)?;
    if now < this_year.end {
        Ok(this_year)
    } else {
        occurrence_in(year + 1, tz)
    }
}

pub(crate) fn reminder_year_in(now: DateTime<Utc>, tz: &Tz) -> Result<i32> {
    let year = current_year(now, tz);
    if now < start_in(year, tz)? {
        Ok(year)
    } else {
        Ok(year + 1)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
