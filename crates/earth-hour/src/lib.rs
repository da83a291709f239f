//! # earth-hour
//!
//! Deterministic computation of Earth Hour: 20:30–21:30 local time on the
//! last Saturday of March, every year.
//!
//! Every function is pure and takes `now` and the IANA zone explicitly; the
//! crate never reads the system clock and keeps no state between calls.
//!
//! ## Modules
//!
//! - [`instant`] — Zone-aware instant construction and calendar arithmetic
//! - [`recurrence`] — The yearly rule: start/end of a given year's occurrence
//! - [`selector`] — Which year's occurrence applies at `now` (three roll-forward policies)
//! - [`window`] — Active-window and event-day predicates, countdowns
//! - [`offsets`] — Reminder instants (one month/week/day/thirty minutes before)
//! - [`format`] — Locale-aware friendly date, time, and diagnostic ISO rendering
//! - [`status`] — One-shot snapshot of all of the above, serializable
//! - [`error`] — Error types

pub mod error;
pub mod format;
pub mod instant;
pub mod offsets;
pub mod recurrence;
pub mod selector;
pub mod status;
pub mod window;

pub use error::{EarthHourError, Result};
pub use format::{friendly_date, friendly_time, iso_with_offset_bracket, DayStyle};
pub use instant::{
    add_duration, compare, diff_minutes, parse_now, parse_timezone, zoned_instant, CalendarUnit,
};
pub use offsets::{reminder_instant, ReminderOffset};
pub use recurrence::{occurrence, occurrence_end, occurrence_start, Occurrence};
pub use selector::{active_window_occurrence, reminder_year, upcoming_occurrence};
pub use status::{status, EarthHourStatus, ReminderInfo};
pub use window::{
    countdown, is_event_day, is_within_active_window, minutes_until_end, minutes_until_start,
    Countdown,
};
