//! Command line and environment configuration.
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use log::LevelFilter;

macro_rules! prefix {
    () => {
        "EARTH_HOUR_"
    };
}

/// Earth Hour status, countdowns, and once-per-year reminders.
#[derive(Debug, Parser)]
#[command(name = "earth-hour", version, about)]
pub struct Config {
    /// IANA timezone the event is observed in.
    #[arg(
        long,
        short = 'z',
        global = true,
        env = concat!(prefix!(), "TIMEZONE"),
        default_value = "Europe/Amsterdam",
        value_name = "ZONE"
    )]
    pub timezone: String,

    /// Language tag for dates (e.g. "en", "nl", "en-GB").
    #[arg(
        long,
        short = 'l',
        global = true,
        env = concat!(prefix!(), "LOCALE"),
        default_value = "en",
        value_name = "TAG"
    )]
    pub locale: String,

    /// Evaluate at this RFC 3339 instant instead of the current time.
    #[arg(long, global = true, env = concat!(prefix!(), "NOW"), value_name = "RFC3339")]
    pub now: Option<String>,

    /// Logging level (written to stderr).
    #[arg(
        long,
        global = true,
        env = concat!(prefix!(), "LOG_LEVEL"),
        default_value = "warn",
        value_name = "LEVEL"
    )]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show whether Earth Hour is on, countdowns, and pending reminders.
    Status {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Show the start and end of one year's Earth Hour.
    Occurrence {
        /// Calendar year (defaults to the current year in the timezone).
        #[arg(long)]
        year: Option<i32>,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// List the reminder instants of one year.
    Reminders {
        /// Calendar year (defaults to the year whose reminders are pending).
        #[arg(long)]
        year: Option<i32>,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Evaluate reminders once and print any that are due.
    Tick {
        /// JSON file recording the last year each reminder fired.
        /// Without it, state lives only for this invocation.
        #[arg(long, env = concat!(prefix!(), "STATE"), value_name = "PATH")]
        state: Option<PathBuf>,
    },
}

impl Config {
    /// The evaluation instant: `--now` if given, the system clock otherwise.
    pub fn now(&self) -> Result<DateTime<Utc>> {
        match &self.now {
            Some(s) => earth_hour::parse_now(s).context("parse --now"),
            None => Ok(Utc::now()),
        }
    }

    /// Fail early on a timezone the tz database does not know.
    pub fn validate(&self) -> Result<()> {
        earth_hour::parse_timezone(&self.timezone).context("validate --timezone")?;
        Ok(())
    }
}
