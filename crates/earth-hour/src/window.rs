//! Point-in-time predicates and countdowns relative to a caller-supplied `now`.
//!
//! Window and day checks are evaluated against
//! [`active_window_occurrence`](crate::selector::active_window_occurrence);
//! countdowns against
//! [`upcoming_occurrence`](crate::selector::upcoming_occurrence).

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::Result;
use crate::instant::{diff_minutes, parse_timezone};
use crate::recurrence::Occurrence;
use crate::selector::{active_window_in, upcoming_in};

/// Both countdowns measured against one occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Countdown {
    /// Negative while the event is running.
    pub minutes_until_start: i64,
    pub minutes_until_end: i64,
}

/// Whether `now` lies in `[start, end)` of this year's Earth Hour.
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidZone`](crate::EarthHourError::InvalidZone)
/// if the timezone cannot be resolved.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use earth_hour::window::is_within_active_window;
///
/// // 20:45 in Amsterdam on 2025-03-29.
/// let now = Utc.with_ymd_and_hms(2025, 3, 29, 19, 45, 0).unwrap();
/// assert!(is_within_active_window(now, "Europe/Amsterdam").unwrap());
/// ```
pub fn is_within_active_window(now: DateTime<Utc>, timezone: &str) -> Result<bool> {
    let tz = parse_timezone(timezone)?;
    Ok(active_window_in(now, &tz)?.contains(&now))
}

/// Whether the local date of `now` is this year's Earth Hour date.
///
/// Stays true for the whole local day, including after the window closes.
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidZone`](crate::EarthHourError::InvalidZone)
/// if the timezone cannot be resolved.
pub fn is_event_day(now: DateTime<Utc>, timezone: &str) -> Result<bool> {
    let tz = parse_timezone(timezone)?;
    let occ = active_window_in(now, &tz)?;
    Ok(is_event_day_in(&occ, now, &tz))
}

/// Whole minutes from `now` until the upcoming start.
///
/// Positive before the event, negative while it runs, and about a year's worth
/// of minutes again once the window has closed.
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidZone`](crate::EarthHourError::InvalidZone)
/// if the timezone cannot be resolved.
pub fn minutes_until_start(now: DateTime<Utc>, timezone: &str) -> Result<i64> {
    Ok(countdown(now, timezone)?.minutes_until_start)
}

/// Whole minutes from `now` until the upcoming end.
///
/// Uses the same roll-forward as [`minutes_until_start`]: at exactly `end`
/// the target is already next year's end, so the value never reaches zero.
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidZone`](crate::EarthHourError::InvalidZone)
/// if the timezone cannot be resolved.
pub fn minutes_until_end(now: DateTime<Utc>, timezone: &str) -> Result<i64> {
    Ok(countdown(now, timezone)?.minutes_until_end)
}

/// Both countdowns from a single [`upcoming_occurrence`](crate::selector::upcoming_occurrence).
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidZone`](crate::EarthHourError::InvalidZone)
/// if the timezone cannot be resolved.
pub fn countdown(now: DateTime<Utc>, timezone: &str) -> Result<Countdown> {
    let tz = parse_timezone(timezone)?;
    Ok(countdown_to(&upcoming_in(now, &tz)?, now))
}

pub(crate) fn countdown_to(occ: &Occurrence, now: DateTime<Utc>) -> Countdown {
    Countdown {
        minutes_until_start: diff_minutes(&occ.start, &now),
        minutes_until_end: diff_minutes(&occ.end, &now),
    }
}

pub(crate) fn is_event_day_in(occ: &Occurrence, now: DateTime<Utc>, tz: &Tz) -> bool {
    now.with_timezone(tz).date_naive() == occ.start.date_naive()
}

// ── Tests ───────────────────────────────────────────────────────────────────
