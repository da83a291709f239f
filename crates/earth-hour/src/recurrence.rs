//! The yearly Earth Hour rule: last Saturday of March, 20:30–21:30 local time.
//!
//! Every call recomputes from the civil calendar. Nothing is cached, so a
//! change of zone or year never needs invalidation.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Weekday};
use chrono_tz::Tz;

use crate::error::{EarthHourError, Result};
use crate::instant::{add_duration, civil_instant, parse_timezone, CalendarUnit};

/// Month the event takes place in.
pub const EVENT_MONTH: u32 = 3;
/// Local hour the event starts at.
pub const START_HOUR: u32 = 20;
/// Local minute the event starts at.
pub const START_MINUTE: u32 = 30;
/// Length of the event.
pub const DURATION_HOURS: i64 = 1;

/// One year's concrete Earth Hour.
///
/// `end` is always `start` plus [`DURATION_HOURS`] of elapsed time, so
/// `end > start` holds for every occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Occurrence {
    /// The calendar year this occurrence belongs to.
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// Whether `instant` falls in the half-open window `[start, end)`.
    pub fn contains<T: chrono::TimeZone>(&self, instant: &DateTime<T>) -> bool {
        self.start <= *instant && *instant < self.end
    }
}

/// The last Saturday of March in `year`.
///
/// Starts from March 31 and walks back to the preceding-or-same Saturday.
/// The walk is at most six days, so the result is always within March 25–31.
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidCalendarDate`] if `year` is outside the
/// supported calendar range.
pub fn last_saturday_of_march(year: i32) -> Result<NaiveDate> {
    let last_day = NaiveDate::from_ymd_opt(year, EVENT_MONTH, 31)
        .ok_or_else(|| EarthHourError::InvalidCalendarDate(format!("year {year}")))?;

    let back = match last_day.weekday() {
        Weekday::Sat => 0,
        Weekday::Sun => 1,
        // Mon=1 … Fri=5 → back 2 … 6
        other => other.number_from_monday() as i64 + 1,
    };

    last_day
        .checked_sub_signed(Duration::days(back))
        .ok_or_else(|| EarthHourError::InvalidCalendarDate(format!("year {year}")))
}

/// Start of Earth Hour in `year`: last Saturday of March at 20:30 local time.
///
/// # Arguments
///
/// * `year` — The calendar year
/// * `timezone` — An IANA timezone name (e.g., `"Europe/Amsterdam"`)
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidZone`] if the timezone cannot be resolved.
///
/// # Examples
///
/// ```
/// use earth_hour::recurrence::occurrence_start;
///
/// let start = occurrence_start(2025, "Europe/Amsterdam").unwrap();
/// assert_eq!(start.to_rfc3339(), "2025-03-29T20:30:00+01:00");
/// ```
pub fn occurrence_start(year: i32, timezone: &str) -> Result<DateTime<Tz>> {
    start_in(year, &parse_timezone(timezone)?)
}

/// End of Earth Hour in `year`: one elapsed hour after [`occurrence_start`].
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidZone`] if the timezone cannot be resolved.
pub fn occurrence_end(year: i32, timezone: &str) -> Result<DateTime<Tz>> {
    let start = occurrence_start(year, timezone)?;
    add_duration(&start, CalendarUnit::Hours, DURATION_HOURS)
}

/// Start and end of Earth Hour in `year`.
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidZone`] if the timezone cannot be resolved.
pub fn occurrence(year: i32, timezone: &str) -> Result<Occurrence> {
    occurrence_in(year, &parse_timezone(timezone)?)
}

pub(crate) fn start_in(year: i32, tz: &Tz) -> Result<DateTime<Tz>> {
    let date = last_saturday_of_march(year)?;
    civil_instant(tz, date, START_HOUR, START_MINUTE)
}

pub(crate) fn occurrence_in(year: i32, tz: &Tz) -> Result<Occurrence> {
    let start = start_in(year, tz)?;
    let end = add_duration(&start, CalendarUnit::Hours, DURATION_HOURS)?;
    Ok(Occurrence { start, end })
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike, Utc};

    const AMS: &str = "Europe/Amsterdam";

    #[test]
    fn test_last_saturday_known_years() {
        assert_eq!(
            last_saturday_of_march(2024).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 30).unwrap()
        );
        assert_eq!(
            last_saturday_of_march(2025).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 29).unwrap()
        );
        assert_eq!(
            last_saturday_of_march(2026).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 28).unwrap()
        );
    }

    #[test]
    fn test_last_saturday_when_31st_is_saturday() {
        // March 31, 2029 is a Saturday.
        assert_eq!(
            last_saturday_of_march(2029).unwrap(),
            NaiveDate::from_ymd_opt(2029, 3, 31).unwrap()
        );
    }

    #[test]
    fn test_last_saturday_when_31st_is_sunday() {
        // March 31, 2030 is a Sunday.
        assert_eq!(
            last_saturday_of_march(2030).unwrap(),
            NaiveDate::from_ymd_opt(2030, 3, 30).unwrap()
        );
    }

    #[test]
    fn test_last_saturday_when_31st_is_monday() {
        // March 31, 2031 is a Monday.
        assert_eq!(
            last_saturday_of_march(2031).unwrap(),
            NaiveDate::from_ymd_opt(2031, 3, 29).unwrap()
        );
    }

    #[test]
    fn test_last_saturday_when_31st_is_friday() {
        // March 31, 2028 is a Friday: the longest walk back, to the 25th.
        assert_eq!(
            last_saturday_of_march(2028).unwrap(),
            NaiveDate::from_ymd_opt(2028, 3, 25).unwrap()
        );
    }

    #[test]
    fn test_last_saturday_out_of_range_year() {
        let err = last_saturday_of_march(i32::MAX).unwrap_err();
        assert!(matches!(err, EarthHourError::InvalidCalendarDate(_)));
    }

    #[test]
    fn test_occurrence_start_amsterdam_fixtures() {
        assert_eq!(
            occurrence_start(2024, AMS).unwrap().to_rfc3339(),
            "2024-03-30T20:30:00+01:00"
        );
        assert_eq!(
            occurrence_start(2025, AMS).unwrap().to_rfc3339(),
            "2025-03-29T20:30:00+01:00"
        );
        assert_eq!(
            occurrence_start(2026, AMS).unwrap().to_rfc3339(),
            "2026-03-28T20:30:00+01:00"
        );
    }

    #[test]
    fn test_occurrence_start_is_local_wall_clock() {
        let ny = occurrence_start(2025, "America/New_York").unwrap();
        assert_eq!(ny.hour(), 20);
        assert_eq!(ny.minute(), 30);
        // EDT (UTC-4) is already in effect in late March.
        assert_eq!(
            ny.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2025, 3, 30, 0, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_occurrence_end_is_one_hour_later() {
        let start = occurrence_start(2025, AMS).unwrap();
        let end = occurrence_end(2025, AMS).unwrap();
        assert_eq!(end.to_rfc3339(), "2025-03-29T21:30:00+01:00");
        assert_eq!(end - start, Duration::hours(1));
    }

    #[test]
    fn test_occurrence_pairs_start_and_end() {
        let occ = occurrence(2026, AMS).unwrap();
        assert_eq!(occ.start, occurrence_start(2026, AMS).unwrap());
        assert_eq!(occ.end, occurrence_end(2026, AMS).unwrap());
        assert_eq!(occ.year(), 2026);
        assert!(occ.end > occ.start);
    }

    #[test]
    fn test_occurrence_contains_is_half_open() {
        let occ = occurrence(2025, AMS).unwrap();
        assert!(occ.contains(&occ.start));
        assert!(occ.contains(&(occ.end - Duration::milliseconds(1))));
        assert!(!occ.contains(&occ.end));
        assert!(!occ.contains(&(occ.start - Duration::milliseconds(1))));
    }

    #[test]
    fn test_occurrence_invalid_zone() {
        let err = occurrence(2025, "Not/AZone").unwrap_err();
        assert!(matches!(err, EarthHourError::InvalidZone(_)));
        assert!(occurrence_start(2025, "").is_err());
        assert!(occurrence_end(2025, "Nowhere").is_err());
    }

    #[test]
    fn test_occurrence_is_deterministic() {
        assert_eq!(occurrence(2027, AMS).unwrap(), occurrence(2027, AMS).unwrap());
    }
}
