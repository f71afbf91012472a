//! `slots` CLI — compute a sitter's bookable slots from a snapshot file.
//!
//! ## Usage
//!
//! ```sh
//! # Walking slots for the next 14 days (snapshot on stdin, JSON out)
//! cat snapshot.json | slots walking --sitter alice
//!
//! # Pin "today" and keep free parts of partly booked windows
//! slots walking --sitter alice -i snapshot.json --today 2026-03-16 --split
//!
//! # Boarding nights with remaining capacity, human-readable
//! slots boarding --sitter alice -i snapshot.json --format text
//!
//! # Upcoming vs. past walking bookings
//! slots history --sitter alice -i snapshot.json
//! ```
//!
//! Diagnostics go to stderr; set `RUST_LOG=slot_engine=debug` (or pass
//! `--verbose`) to see which records were excluded and why.

mod config;

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use slot_engine::model::{AvailabilitySlot, ExistingBooking};
use slot_engine::{BookingLists, MemoryDirectory, OverlapPolicy, SitterSnapshot};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, OutputFormat, DEFAULT_CONFIG_PATH};

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Pet sitter walking and boarding availability"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (TOML)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// IANA timezone for the sitter's "today" (overrides the config file)
    #[arg(long, global = true)]
    timezone: Option<String>,

    /// Output format (overrides the config file)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Log excluded records to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Walking slots for the 14 days starting today
    Walking {
        /// Sitter id to compute slots for
        #[arg(long)]
        sitter: String,
        /// Snapshot file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
        /// Keep the free parts of partly booked windows
        #[arg(long)]
        split: bool,
    },
    /// Boarding nights with remaining capacity
    Boarding {
        /// Sitter id to compute slots for
        #[arg(long)]
        sitter: String,
        /// Snapshot file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Upcoming and past walking bookings
    History {
        /// Sitter id to list bookings for
        #[arg(long)]
        sitter: String,
        /// Snapshot file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Override today's date (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load_from(&cli.config)?;
    let timezone = cli.timezone.unwrap_or(config.timezone);
    let format = cli.format.unwrap_or(config.format);
    debug!(%timezone, ?format, "configuration resolved");

    let output = match cli.command {
        Commands::Walking {
            sitter,
            input,
            today,
            split,
        } => {
            let directory = load_directory(input.as_deref())?;
            let today = resolve_today(today.as_deref(), &timezone)?;
            let policy = if split {
                OverlapPolicy::SplitFree
            } else {
                OverlapPolicy::WholeWindow
            };
            info!(%sitter, %today, ?policy, "computing walking slots");
            let slots = slot_engine::plan_walking(&directory, &sitter, today, policy)
                .with_context(|| format!("Failed to compute walking slots for {}", sitter))?;
            render_slots(&slots, format)?
        }
        Commands::Boarding { sitter, input } => {
            let directory = load_directory(input.as_deref())?;
            info!(%sitter, "computing boarding slots");
            let slots = slot_engine::plan_boarding(&directory, &sitter)
                .with_context(|| format!("Failed to compute boarding slots for {}", sitter))?;
            render_slots(&slots, format)?
        }
        Commands::History {
            sitter,
            input,
            today,
        } => {
            let directory = load_directory(input.as_deref())?;
            let today = resolve_today(today.as_deref(), &timezone)?;
            let lists = slot_engine::plan_history(&directory, &sitter, today)
                .with_context(|| format!("Failed to list bookings for {}", sitter))?;
            render_history(&lists, format)?
        }
    };

    println!("{}", output);
    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_directory(path: Option<&str>) -> Result<MemoryDirectory> {
    let json = read_input(path)?;
    let snapshot = SitterSnapshot::from_json(&json).context("Failed to parse sitter snapshot")?;
    Ok(MemoryDirectory::new(snapshot))
}

/// `--today` wins; otherwise the current date in the sitter's timezone.
fn resolve_today(today: Option<&str>, timezone: &str) -> Result<NaiveDate> {
    match today {
        Some(raw) => slot_engine::normalize_date(raw)
            .with_context(|| format!("Invalid --today date: '{}'", raw)),
        None => slot_engine::local_today(Utc::now(), timezone)
            .with_context(|| format!("Failed to resolve today's date in {}", timezone)),
    }
}

fn render_slots(slots: &[AvailabilitySlot], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(slots).context("Failed to serialize slots")
        }
        OutputFormat::Text => {
            if slots.is_empty() {
                return Ok("No available slots".to_string());
            }
            let lines: Vec<String> = slots
                .iter()
                .map(|s| format!("{}, {}  {}", s.day, s.date, s.formatted_time))
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

fn render_history(lists: &BookingLists, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(lists).context("Failed to serialize bookings")
        }
        OutputFormat::Text => {
            let mut out = vec!["Upcoming:".to_string()];
            out.extend(lists.upcoming.iter().map(booking_line));
            out.push("History:".to_string());
            out.extend(lists.history.iter().map(booking_line));
            Ok(out.join("\n"))
        }
    }
}

fn booking_line(booking: &ExistingBooking) -> String {
    format!(
        "  {} {}-{} {}",
        booking.date,
        booking.start_time,
        booking.end_time,
        booking.status.as_str()
    )
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
