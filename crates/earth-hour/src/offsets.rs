//! Reminder instants at fixed offsets before the start of Earth Hour.

use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::Result;
use crate::instant::{add_duration, parse_timezone, with_time_of_day, CalendarUnit};
use crate::recurrence::{start_in, START_HOUR};

/// When a reminder fires, relative to the start of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderOffset {
    /// Start minus one civil month (clamped to the shorter month).
    OneMonthBefore,
    /// Start minus seven civil days.
    OneWeekBefore,
    /// Start minus one civil day.
    OneDayBefore,
    /// 20:00 local on the event day.
    ThirtyMinutesBefore,
}

impl ReminderOffset {
    /// All offsets, earliest first.
    pub const ALL: [ReminderOffset; 4] = [
        ReminderOffset::OneMonthBefore,
        ReminderOffset::OneWeekBefore,
        ReminderOffset::OneDayBefore,
        ReminderOffset::ThirtyMinutesBefore,
    ];

    /// Key under which the last year this reminder fired is stored.
    pub fn storage_key(self) -> &'static str {
        match self {
            ReminderOffset::OneMonthBefore => "notifications.oneMonthBeforeYear",
            ReminderOffset::OneWeekBefore => "notifications.oneWeekBeforeYear",
            ReminderOffset::OneDayBefore => "notifications.oneDayBeforeYear",
            ReminderOffset::ThirtyMinutesBefore => "notifications.thirtyMinutesBeforeYear",
        }
    }

    /// The reminder instant for `year` in `timezone`.
    ///
    /// # Errors
    ///
    /// Returns [`EarthHourError::InvalidZone`](crate::EarthHourError::InvalidZone)
    /// if the timezone cannot be resolved.
    pub fn instant(self, year: i32, timezone: &str) -> Result<DateTime<Tz>> {
        self.instant_in(year, &parse_timezone(timezone)?)
    }

    pub(crate) fn instant_in(self, year: i32, tz: &Tz) -> Result<DateTime<Tz>> {
        let start = start_in(year, tz)?;
        match self {
            ReminderOffset::OneMonthBefore => add_duration(&start, CalendarUnit::Months, -1),
            ReminderOffset::OneWeekBefore => add_duration(&start, CalendarUnit::Days, -7),
            ReminderOffset::OneDayBefore => add_duration(&start, CalendarUnit::Days, -1),
            // 20:00 on the event day, independent of START_MINUTE.
            ReminderOffset::ThirtyMinutesBefore => with_time_of_day(&start, START_HOUR, 0),
        }
    }
}

impl fmt::Display for ReminderOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReminderOffset::OneMonthBefore => "one month before",
            ReminderOffset::OneWeekBefore => "one week before",
            ReminderOffset::OneDayBefore => "one day before",
            ReminderOffset::ThirtyMinutesBefore => "thirty minutes before",
        };
        f.write_str(s)
    }
}

/// The instant `offset` fires for `year` in `timezone`.
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidZone`](crate::EarthHourError::InvalidZone)
/// if the timezone cannot be resolved.
///
/// # Examples
///
/// ```
/// use earth_hour::offsets::{reminder_instant, ReminderOffset};
///
/// let dt = reminder_instant(ReminderOffset::OneMonthBefore, 2025, "Europe/Amsterdam").unwrap();
/// assert_eq!(dt.to_rfc3339(), "2025-02-28T20:30:00+01:00");
/// ```
pub fn reminder_instant(offset: ReminderOffset, year: i32, timezone: &str) -> Result<DateTime<Tz>> {
    offset.instant(year, timezone)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::occurrence_start;
    use crate::EarthHourError;

    const AMS: &str = "Europe/Amsterdam";

    fn at(offset: ReminderOffset, year: i32) -> String {
        reminder_instant(offset, year, AMS).unwrap().to_rfc3339()
    }

    #[test]
    fn test_one_month_before_clamps_in_common_year() {
        assert_eq!(
            at(ReminderOffset::OneMonthBefore, 2025),
            "2025-02-28T20:30:00+01:00"
        );
    }

    #[test]
    fn test_one_month_before_leap_year() {
        assert_eq!(
            at(ReminderOffset::OneMonthBefore, 2024),
            "2024-02-29T20:30:00+01:00"
        );
    }

    #[test]
    fn test_one_month_before_no_clamp_needed() {
        // 2026 start is March 28 → February 28.
        assert_eq!(
            at(ReminderOffset::OneMonthBefore, 2026),
            "2026-02-28T20:30:00+01:00"
        );
    }

    #[test]
    fn test_one_week_before() {
        assert_eq!(
            at(ReminderOffset::OneWeekBefore, 2025),
            "2025-03-22T20:30:00+01:00"
        );
    }

    #[test]
    fn test_one_day_before() {
        assert_eq!(
            at(ReminderOffset::OneDayBefore, 2025),
            "2025-03-28T20:30:00+01:00"
        );
    }

    #[test]
    fn test_thirty_minutes_before_is_twenty_hundred() {
        let thirty = reminder_instant(ReminderOffset::ThirtyMinutesBefore, 2025, AMS).unwrap();
        assert_eq!(thirty.to_rfc3339(), "2025-03-29T20:00:00+01:00");
        let start = occurrence_start(2025, AMS).unwrap();
        assert_eq!((start - thirty).num_minutes(), 30);
    }

    #[test]
    fn test_one_month_before_keeps_wall_clock_across_dst() {
        // US DST starts 2025-03-09: the start is EDT, a month earlier is EST.
        let month = reminder_instant(ReminderOffset::OneMonthBefore, 2025, "America/New_York")
            .unwrap()
            .to_rfc3339();
        assert_eq!(month, "2025-02-28T20:30:00-05:00");
    }

    #[test]
    fn test_offsets_are_ordered() {
        let instants: Vec<_> = ReminderOffset::ALL
            .iter()
            .map(|o| o.instant(2025, AMS).unwrap())
            .collect();
        assert!(instants.windows(2).all(|w| w[0] < w[1]));
        assert!(instants[3] < occurrence_start(2025, AMS).unwrap());
    }

    #[test]
    fn test_storage_keys_are_distinct() {
        let keys: std::collections::HashSet<_> =
            ReminderOffset::ALL.iter().map(|o| o.storage_key()).collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(
            ReminderOffset::OneMonthBefore.storage_key(),
            "notifications.oneMonthBeforeYear"
        );
    }

    #[test]
    fn test_offset_serializes_in_snake_case() {
        let json = serde_json::to_value(ReminderOffset::ALL).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                "one_month_before",
                "one_week_before",
                "one_day_before",
                "thirty_minutes_before"
            ])
        );
    }

    #[test]
    fn test_offset_invalid_zone() {
        let err = reminder_instant(ReminderOffset::OneDayBefore, 2025, "Nope").unwrap_err();
        assert!(matches!(err, EarthHourError::InvalidZone(_)));
    }
}
