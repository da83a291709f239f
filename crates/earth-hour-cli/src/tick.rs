//! One scheduler evaluation: due reminders and the active-window notice.
use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use earth_hour::{
    active_window_occurrence, friendly_date, friendly_time, is_within_active_window,
    iso_with_offset_bracket, occurrence, reminder_year, ReminderOffset,
};
use log::{debug, info};

use crate::store::ReminderStore;

/// Notifications produced by one tick, in the order they should be shown.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The reminders that fired, earliest first.
    pub fired: Vec<ReminderOffset>,
    pub messages: Vec<String>,
}

/// Evaluate reminders at `now` and record the ones handled in `store`.
///
/// A reminder is due once its instant for the pending reminder year has been
/// reached and `store` does not already hold that year under its key. Every
/// due reminder is announced, earliest first, including ones that became due
/// during a pause between ticks.
pub fn run(
    now: DateTime<Utc>,
    timezone: &str,
    locale: &str,
    store: &mut dyn ReminderStore,
) -> Result<TickOutcome> {
    let year = reminder_year(now, timezone)?;
    let occ = occurrence(year, timezone)?;
    debug!(
        "Tick at {} for {} (start {})",
        iso_with_offset_bracket(&now.with_timezone(&occ.start.timezone())),
        year,
        iso_with_offset_bracket(&occ.start)
    );

    let mut outcome = TickOutcome::default();
    for kind in ReminderOffset::ALL {
        let fires_at = kind.instant(year, timezone)?;
        if now < fires_at {
            continue;
        }
        if store.get(kind.storage_key())? == Some(year) {
            debug!("Reminder {} already sent for {}", kind, year);
            continue;
        }
        info!("Firing reminder {} for {}", kind, year);
        store.set(kind.storage_key(), year)?;
        outcome.fired.push(kind);
        outcome.messages.push(reminder_message(kind, &occ.start, locale));
    }

    if is_within_active_window(now, timezone)? {
        let current = active_window_occurrence(now, timezone)?;
        outcome.messages.push(format!(
            "Earth Hour is on now, lights off until {}.",
            friendly_time(&current.end)
        ));
    }

    Ok(outcome)
}

fn reminder_message(kind: ReminderOffset, start: &DateTime<Tz>, locale: &str) -> String {
    let date = friendly_date(start, locale, false);
    let time = friendly_time(start);
    match kind {
        ReminderOffset::OneMonthBefore => {
            format!("Earth Hour is one month away: {date} at {time}.")
        }
        ReminderOffset::OneWeekBefore => format!("Earth Hour is one week away: {date} at {time}."),
        ReminderOffset::OneDayBefore => format!("Earth Hour is tomorrow: {date} at {time}."),
        ReminderOffset::ThirtyMinutesBefore => {
            format!("Earth Hour starts in 30 minutes, at {time}.")
        }
    }
}
