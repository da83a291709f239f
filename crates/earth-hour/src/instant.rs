//! Timezone-aware instant arithmetic.
//!
//! Every instant in this crate is a `DateTime<Tz>`: an absolute point in time
//! that carries the IANA zone it should be displayed in. Ordering and
//! equality are zone-independent (two instants compare by their UTC value),
//! while calendar arithmetic and formatting happen on the zone's wall clock.
//!
//! # Functions
//!
//! - [`parse_timezone`] — Resolve an IANA zone name
//! - [`zoned_instant`] — Build a wall-clock instant in a named zone
//! - [`parse_now`] — Parse a caller-supplied RFC 3339 `now`
//! - [`add_duration`] — Add minutes/hours (elapsed) or days/months (civil)
//! - [`diff_minutes`] — Whole minutes between two instants
//! - [`compare`] — Zone-independent ordering
//! - [`with_time_of_day`] — Replace the clock field, keeping the local date
//!
//! None of these functions mutate their inputs; each returns a fresh value.

use std::cmp::Ordering;

use chrono::{
    DateTime, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::error::{EarthHourError, Result};

/// The unit of an [`add_duration`] adjustment.
///
/// `Minutes` and `Hours` add elapsed time, so the wall clock may jump across a
/// DST transition. `Days` and `Months` move the civil calendar and keep the
/// wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarUnit {
    Minutes,
    Hours,
    Days,
    /// Preserves the day of month, clamped to the length of the target month.
    Months,
}

// ── construction ────────────────────────────────────────────────────────────

/// Parse an IANA timezone string into `Tz`.
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidZone`] if the name is not in the tz database.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| EarthHourError::InvalidZone(format!("'{}'", s)))
}

/// Build the instant at `hour:minute` local time on the given civil date in `timezone`.
///
/// Seconds and sub-seconds are zero.
///
/// # Arguments
///
/// * `year`, `month`, `day` — A proleptic Gregorian date
/// * `hour`, `minute` — Local wall-clock time (24-hour)
/// * `timezone` — An IANA timezone name (e.g., `"Europe/Amsterdam"`)
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidZone`] if the timezone cannot be resolved,
/// or [`EarthHourError::InvalidCalendarDate`] if the date or time of day does
/// not exist (e.g., February 30).
///
/// # Examples
///
/// ```
/// use earth_hour::instant::zoned_instant;
///
/// let dt = zoned_instant(2025, 3, 29, 20, 30, "Europe/Amsterdam").unwrap();
/// assert_eq!(dt.to_rfc3339(), "2025-03-29T20:30:00+01:00");
/// ```
pub fn zoned_instant(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    timezone: &str,
) -> Result<DateTime<Tz>> {
    let tz = parse_timezone(timezone)?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        EarthHourError::InvalidCalendarDate(format!("{year:04}-{month:02}-{day:02}"))
    })?;
    civil_instant(&tz, date, hour, minute)
}

/// Combine a civil date and a time of day in `tz`.
pub(crate) fn civil_instant(
    tz: &Tz,
    date: NaiveDate,
    hour: u32,
    minute: u32,
) -> Result<DateTime<Tz>> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
        EarthHourError::InvalidCalendarDate(format!("time of day {hour:02}:{minute:02}"))
    })?;
    resolve_local(tz, date.and_time(time))
}

/// Map a local wall-clock datetime to an instant in `tz`.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times that
/// fall in a DST gap are read with the offset in force before the gap, which
/// lands the same distance past the gap (02:30 in a 02:00→03:00 gap becomes
/// 03:30).
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidCalendarDate`] if the datetime is outside
/// the representable range.
pub fn resolve_local(tz: &Tz, naive: NaiveDateTime) -> Result<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => {
            let before_gap = naive
                .checked_sub_signed(Duration::days(1))
                .ok_or_else(|| out_of_range(&naive))?;
            let offset = tz.offset_from_utc_datetime(&before_gap).fix();
            let utc = naive
                .checked_sub_signed(Duration::seconds(offset.local_minus_utc() as i64))
                .ok_or_else(|| out_of_range(&naive))?;
            Ok(Utc.from_utc_datetime(&utc).with_timezone(tz))
        }
    }
}

/// Parse an RFC 3339 datetime string into `DateTime<Utc>`.
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidDatetime`] if the string cannot be parsed.
pub fn parse_now(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| EarthHourError::InvalidDatetime(format!("'{}': {}", s, e)))
}

// ── arithmetic ──────────────────────────────────────────────────────────────

/// Add `amount` units to `instant`, honoring the civil calendar of its zone.
///
/// A negative `amount` subtracts. Month arithmetic clamps to the last day of
/// the target month: March 29 minus one month is February 28 in a common
/// year and February 29 in a leap year.
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidCalendarDate`] if the result is outside
/// the representable range.
pub fn add_duration(
    instant: &DateTime<Tz>,
    unit: CalendarUnit,
    amount: i64,
) -> Result<DateTime<Tz>> {
    let tz = instant.timezone();
    match unit {
        CalendarUnit::Minutes => {
            let delta = Duration::try_minutes(amount).ok_or_else(|| overflow(unit, amount))?;
            instant
                .checked_add_signed(delta)
                .ok_or_else(|| overflow(unit, amount))
        }
        CalendarUnit::Hours => {
            let delta = Duration::try_hours(amount).ok_or_else(|| overflow(unit, amount))?;
            instant
                .checked_add_signed(delta)
                .ok_or_else(|| overflow(unit, amount))
        }
        CalendarUnit::Days => {
            // Shift the wall clock, not the elapsed time, so 20:30 stays 20:30 across DST.
            let delta = Duration::try_days(amount).ok_or_else(|| overflow(unit, amount))?;
            let shifted = instant
                .naive_local()
                .checked_add_signed(delta)
                .ok_or_else(|| overflow(unit, amount))?;
            resolve_local(&tz, shifted)
        }
        CalendarUnit::Months => {
            let count =
                u32::try_from(amount.unsigned_abs()).map_err(|_| overflow(unit, amount))?;
            let months = Months::new(count);
            let local = instant.naive_local();
            let shifted = if amount >= 0 {
                local.checked_add_months(months)
            } else {
                local.checked_sub_months(months)
            }
            .ok_or_else(|| overflow(unit, amount))?;
            resolve_local(&tz, shifted)
        }
    }
}

/// Replace the local time of day of `instant`, keeping its local date and zone.
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidCalendarDate`] if `hour`/`minute` is not a
/// valid time of day.
pub fn with_time_of_day(instant: &DateTime<Tz>, hour: u32, minute: u32) -> Result<DateTime<Tz>> {
    civil_instant(&instant.timezone(), instant.date_naive(), hour, minute)
}

/// The difference `a - b` rounded to the nearest whole minute.
///
/// Halves round away from zero: +30 seconds is 1 minute, -30 seconds is -1.
pub fn diff_minutes<A: TimeZone, B: TimeZone>(a: &DateTime<A>, b: &DateTime<B>) -> i64 {
    let millis = a.timestamp_millis() - b.timestamp_millis();
    let rounded = (millis.abs() + 30_000) / 60_000;
    if millis < 0 {
        -rounded
    } else {
        rounded
    }
}

/// Order two instants by their absolute value, ignoring their zones.
pub fn compare<A: TimeZone, B: TimeZone>(a: &DateTime<A>, b: &DateTime<B>) -> Ordering {
    a.naive_utc().cmp(&b.naive_utc())
}

fn overflow(unit: CalendarUnit, amount: i64) -> EarthHourError {
    EarthHourError::InvalidCalendarDate(format!("adding {amount} {unit:?} is out of range"))
}

fn out_of_range(naive: &NaiveDateTime) -> EarthHourError {
    EarthHourError::InvalidCalendarDate(format!("{naive} is out of range"))
}

// ── Tests ───────────────────────────────────────────────────────────────────
