//! `earth-hour`: Earth Hour status, countdowns, and reminders from the command line.
//!
//! This is the wrapping layer around the `earth-hour` library: it reads the
//! clock (unless `--now` is given), logs to stderr, and owns the reminder
//! bookkeeping file used by `tick`.

mod config;
mod store;
mod tick;

use std::io::Write;

use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use earth_hour::{
    friendly_date, friendly_time, iso_with_offset_bracket, occurrence, parse_timezone,
    reminder_year, status, EarthHourStatus, ReminderOffset,
};
use log::debug;
use serde::Serialize;

use crate::config::{Command, Config};
use crate::store::{JsonFileStore, MemoryStore, ReminderStore};

#[derive(Debug, Serialize)]
struct OccurrenceReport {
    year: i32,
    timezone: String,
    start: String,
    end: String,
    friendly_date: String,
    friendly_time: String,
}

#[derive(Debug, Serialize)]
struct ReminderReport {
    kind: ReminderOffset,
    storage_key: &'static str,
    fires_at: String,
    friendly_date: String,
    friendly_time: String,
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_logging(&config).context("set log verbosity")?;
    config.validate()?;

    let now = config.now()?;
    debug!("Evaluating at {}", now.to_rfc3339());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match &config.command {
        Command::Status { json } => {
            let report = status(now, &config.timezone, &config.locale)?;
            if *json {
                print_json(&mut out, &report)?;
            } else {
                print_status(&mut out, &report)?;
            }
        }
        Command::Occurrence { year, json } => {
            let tz = parse_timezone(&config.timezone)?;
            let year = year.unwrap_or_else(|| now.with_timezone(&tz).year());
            let report = occurrence_report(year, &config)?;
            if *json {
                print_json(&mut out, &report)?;
            } else {
                writeln!(out, "Earth Hour {} ({})", report.year, report.timezone)?;
                writeln!(out, "  start: {}", report.start)?;
                writeln!(out, "  end:   {}", report.end)?;
                writeln!(
                    out,
                    "  when:  {}, {}",
                    report.friendly_date, report.friendly_time
                )?;
            }
        }
        Command::Reminders { year, json } => {
            let year = match year {
                Some(y) => *y,
                None => reminder_year(now, &config.timezone)?,
            };
            let reports = reminder_reports(year, &config)?;
            if *json {
                print_json(&mut out, &reports)?;
            } else {
                writeln!(out, "Reminders for Earth Hour {} ({})", year, config.timezone)?;
                for r in &reports {
                    writeln!(
                        out,
                        "  {:<22} {}  {} {}",
                        r.kind.to_string(),
                        r.fires_at,
                        r.friendly_date,
                        r.friendly_time
                    )?;
                }
            }
        }
        Command::Tick { state } => {
            let mut store: Box<dyn ReminderStore> = match state {
                Some(path) => Box::new(JsonFileStore::open(path)?),
                None => Box::new(MemoryStore::default()),
            };
            let outcome = tick::run(now, &config.timezone, &config.locale, store.as_mut())
                .context("evaluate reminders")?;
            for message in &outcome.messages {
                writeln!(out, "{message}")?;
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Config) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(config.log_level)
        .format_timestamp_millis()
        .try_init()
        .context("init env logger")
}

fn occurrence_report(year: i32, config: &Config) -> Result<OccurrenceReport> {
    let occ = occurrence(year, &config.timezone)?;
    debug!(
        "Occurrence {}: {} .. {}",
        year,
        iso_with_offset_bracket(&occ.start),
        iso_with_offset_bracket(&occ.end)
    );
    Ok(OccurrenceReport {
        year,
        timezone: config.timezone.clone(),
        start: occ.start.to_rfc3339(),
        end: occ.end.to_rfc3339(),
        friendly_date: friendly_date(&occ.start, &config.locale, true),
        friendly_time: format!("{}–{}", friendly_time(&occ.start), friendly_time(&occ.end)),
    })
}

fn reminder_reports(year: i32, config: &Config) -> Result<Vec<ReminderReport>> {
    ReminderOffset::ALL
        .iter()
        .map(|&kind| {
            let at = kind.instant(year, &config.timezone)?;
            Ok(ReminderReport {
                kind,
                storage_key: kind.storage_key(),
                fires_at: at.to_rfc3339(),
                friendly_date: friendly_date(&at, &config.locale, true),
                friendly_time: friendly_time(&at),
            })
        })
        .collect()
}

fn print_status(out: &mut impl Write, s: &EarthHourStatus) -> Result<()> {
    writeln!(out, "Timezone:            {}", s.timezone)?;
    writeln!(out, "Now:                 {}", s.now)?;
    writeln!(out, "Active:              {}", yes_no(s.is_active))?;
    writeln!(out, "Event day:           {}", yes_no(s.is_event_day))?;
    writeln!(
        out,
        "Upcoming:            {} at {} ({})",
        s.friendly_date, s.friendly_time, s.upcoming_start
    )?;
    writeln!(out, "Minutes until start: {}", s.minutes_until_start)?;
    writeln!(out, "Minutes until end:   {}", s.minutes_until_end)?;
    writeln!(out, "Reminders for {}:", s.reminder_year)?;
    for r in &s.reminders {
        writeln!(
            out,
            "  {:<22} {}{}",
            r.kind.to_string(),
            r.fires_at,
            if r.reached { "  (reached)" } else { "" }
        )?;
    }
    Ok(())
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("serialize output")?;
    writeln!(out)?;
    Ok(())
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}
