//! A single-evaluation snapshot of everything the core knows at `now`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::format::{friendly_date, friendly_time};
use crate::instant::parse_timezone;
use crate::offsets::ReminderOffset;
use crate::selector::{active_window_in, reminder_year_in, upcoming_in};
use crate::window::{countdown_to, is_event_day_in};

/// One reminder for the pending reminder year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderInfo {
    pub kind: ReminderOffset,
    /// Bookkeeping key (e.g., `"notifications.oneWeekBeforeYear"`).
    pub storage_key: String,
    /// Local RFC 3339 instant the reminder fires at.
    pub fires_at: String,
    /// Whether `now` is at or past `fires_at`.
    pub reached: bool,
}

/// Everything the point-in-time predicates, countdowns, and reminder offsets
/// report for one `now`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarthHourStatus {
    /// The IANA timezone used.
    pub timezone: String,
    /// The evaluation instant in the timezone (RFC 3339).
    pub now: String,
    pub is_active: bool,
    pub is_event_day: bool,
    pub minutes_until_start: i64,
    pub minutes_until_end: i64,
    /// Start of the upcoming occurrence (RFC 3339 with offset).
    pub upcoming_start: String,
    /// End of the upcoming occurrence (RFC 3339 with offset).
    pub upcoming_end: String,
    /// Upcoming start as a locale-aware date, e.g. "28th March 2026".
    pub friendly_date: String,
    /// Upcoming start as "HH:mm".
    pub friendly_time: String,
    pub reminder_year: i32,
    pub reminders: Vec<ReminderInfo>,
}

/// Evaluate every predicate, countdown, and reminder offset at `now`.
///
/// Countdowns come from a single upcoming occurrence, so they are consistent
/// with each other.
///
/// # Errors
///
/// Returns [`EarthHourError::InvalidZone`](crate::EarthHourError::InvalidZone)
/// if the timezone cannot be resolved.
pub fn status(now: DateTime<Utc>, timezone: &str, locale: &str) -> Result<EarthHourStatus> {
    let tz = parse_timezone(timezone)?;

    let active = active_window_in(now, &tz)?;
    let upcoming = upcoming_in(now, &tz)?;
    let countdown = countdown_to(&upcoming, now);
    let year = reminder_year_in(now, &tz)?;

    let reminders = ReminderOffset::ALL
        .iter()
        .map(|&kind| {
            let fires_at = kind.instant_in(year, &tz)?;
            Ok(ReminderInfo {
                kind,
                storage_key: kind.storage_key().to_string(),
                fires_at: fires_at.to_rfc3339(),
                reached: now >= fires_at,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(EarthHourStatus {
        timezone: timezone.to_string(),
        now: now
            .with_timezone(&tz)
            .to_rfc3339_opts(SecondsFormat::Secs, false),
        is_active: active.contains(&now),
        is_event_day: is_event_day_in(&active, now, &tz),
        minutes_until_start: countdown.minutes_until_start,
        minutes_until_end: countdown.minutes_until_end,
        upcoming_start: upcoming.start.to_rfc3339(),
        upcoming_end: upcoming.end.to_rfc3339(),
        friendly_date: friendly_date(&upcoming.start, locale, true),
        friendly_time: friendly_time(&upcoming.start),
        reminder_year: year,
        reminders,
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
