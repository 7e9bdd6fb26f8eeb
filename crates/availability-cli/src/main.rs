//! `avail` CLI: find meeting slots and busy times from calendar event dumps.
//!
//! ## Usage
//!
//! ```sh
//! # One-hour slots for me and two guests next week
//! avail --events-dir ./events slots \
//!     --start 2026-03-16T00:00:00Z --end 2026-03-21T00:00:00Z \
//!     --duration 60 --guests alice@example.com,bob@example.com
//!
//! # Only count meetings booked in the Atlas room
//! avail slots --start ... --end ... --duration 30 --room atlas
//!
//! # Busy times for a list of people (primary calendar when --users is omitted)
//! avail busy --start 2026-03-16T00:00:00Z --end 2026-03-17T00:00:00Z --users alice@example.com
//! ```
//!
//! Settings come from flags, then `AVAIL_EVENTS_DIR`, then `avail.toml`.
//! Logs go to stderr (`RUST_LOG`, or `-v` for debug); JSON goes to stdout.

mod config;
mod output;
mod source;

use std::path::PathBuf;

use anyhow::{Context, Result};
use availability_engine::busy::{split_calendar_list, users_or_primary};
use availability_engine::{busy_report, find_meeting_slots, SlotQuery, SlotRequest};
use chrono::{DateTime, FixedOffset};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{FileConfig, Overrides, Settings};
use crate::output::{BusyOutput, SlotsOutput};
use crate::source::FileSource;

#[derive(Parser)]
#[command(
    name = "avail",
    version,
    about = "Find meeting slots and busy times across calendars"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./avail.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding one <calendar-id>.json event dump per calendar
    #[arg(long, global = true, env = "AVAIL_EVENTS_DIR")]
    events_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct Range {
    /// Start of the search range (RFC 3339)
    #[arg(long, value_parser = parse_rfc3339)]
    start: DateTime<FixedOffset>,
    /// End of the search range (RFC 3339)
    #[arg(long, value_parser = parse_rfc3339)]
    end: DateTime<FixedOffset>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find available meeting slots for you and your guests
    Slots {
        #[command(flatten)]
        range: Range,
        /// Meeting length in minutes
        #[arg(long, allow_negative_numbers = true)]
        duration: i64,
        /// Comma-separated guest calendar ids (email addresses)
        #[arg(long, default_value = "")]
        guests: String,
        /// Only events whose location contains this text block time
        #[arg(long)]
        room: Option<String>,
        /// Start of working hours, HH:MM (default 09:00)
        #[arg(long)]
        working_hours_start: Option<String>,
        /// End of working hours, HH:MM (default 17:00)
        #[arg(long)]
        working_hours_end: Option<String>,
        /// Maximum number of slots to return (default 5)
        #[arg(long, allow_negative_numbers = true)]
        max_results: Option<i64>,
    },
    /// List busy periods for one or more calendars
    Busy {
        #[command(flatten)]
        range: Range,
        /// Comma-separated calendar ids (primary calendar only when omitted)
        #[arg(long, default_value = "")]
        users: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let file = FileConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Slots {
            range,
            duration,
            guests,
            room,
            working_hours_start,
            working_hours_end,
            max_results,
        } => {
            let settings = Settings::resolve(
                file,
                Overrides {
                    events_dir: cli.events_dir,
                    working_hours_start,
                    working_hours_end,
                    max_results,
                },
            )?;
            let source = FileSource::new(&settings.events_dir);

            let request = SlotRequest::new(range.start, range.end, duration)
                .with_working_hours(settings.working_hours)
                .with_max_results(settings.max_results);
            let query = SlotQuery {
                primary_calendar: settings.primary_calendar.clone(),
                guests: split_calendar_list(&guests),
                room: room.clone(),
                request,
            };

            info!(
                calendars = query.calendars().len(),
                working_hours = %settings.working_hours,
                "searching for slots"
            );
            let search =
                find_meeting_slots(&source, &query).context("Failed to search for slots")?;

            let guests = Some(guests).filter(|_| !query.guests.is_empty());
            let room = room.filter(|r| !r.is_empty());
            print_json(&SlotsOutput::new(
                &search,
                &settings.primary_calendar,
                guests,
                room,
            ))?;
        }
        Commands::Busy { range, users } => {
            let settings = Settings::resolve(
                file,
                Overrides {
                    events_dir: cli.events_dir,
                    ..Overrides::default()
                },
            )?;
            let source = FileSource::new(&settings.events_dir);

            let calendars = users_or_primary(&settings.primary_calendar, &users);
            info!(calendars = calendars.len(), "collecting busy times");
            let report = busy_report(&source, &calendars, range.start, range.end)
                .context("Failed to collect busy times")?;

            print_json(&BusyOutput::from(&report))?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_rfc3339(s: &str) -> std::result::Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(s).map_err(|e| format!("expected RFC 3339 time: {e}"))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
