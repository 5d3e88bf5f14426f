//! # Slotbook CLI
//!
//! Command-line front end over the same slot policy the HTTP server uses.
//! Every command opens the configured store, runs one operation and prints a
//! human-readable summary. Failures, including domain rejections such as an
//! overlapping slot, end with a non-zero exit code.

pub mod commands;
pub mod config;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use eyre::Result;
use slotbook_core::{
    policy::DEFAULT_SLOT_MINUTES,
    validation::{parse_date, parse_timestamp, validate_slot_duration},
    SlotPolicy,
};
use tracing::debug;

use crate::config::StoreArgs;

/// Therapist appointment slot scheduling.
#[derive(Parser, Debug)]
#[command(name = "slotbook-cli")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Required length of a slot created with `create-slot`, in minutes.
    #[arg(
        long,
        env = "SLOT_DURATION_MINUTES",
        default_value_t = DEFAULT_SLOT_MINUTES,
        value_parser = slot_minutes_arg,
        global = true
    )]
    pub slot_duration_minutes: i64,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Create a new available slot for a therapist.
    CreateSlot {
        therapist_id: String,
        /// Start time (YYYY-MM-DDTHH:MM:SS)
        #[arg(value_parser = time_arg)]
        start_time: NaiveDateTime,
        /// End time (YYYY-MM-DDTHH:MM:SS)
        #[arg(value_parser = time_arg)]
        end_time: NaiveDateTime,
    },
    /// List available slots for a therapist.
    ListSlots {
        therapist_id: String,
        /// Day to list (YYYY-MM-DD)
        #[arg(value_parser = date_arg)]
        date: NaiveDate,
        /// Include booked slots.
        #[arg(long)]
        all: bool,
    },
    /// Book a slot with a therapist.
    BookSlot {
        therapist_id: String,
        /// Start time of the slot to book
        #[arg(value_parser = time_arg)]
        slot_time: NaiveDateTime,
    },
    /// Cancel a booked slot.
    CancelBooking {
        therapist_id: String,
        /// Start time of the booked slot
        #[arg(value_parser = time_arg)]
        slot_time: NaiveDateTime,
    },
    /// Split a time range into consecutive free slots.
    CreateRange {
        therapist_id: String,
        #[arg(value_parser = time_arg)]
        start_time: NaiveDateTime,
        #[arg(value_parser = time_arg)]
        end_time: NaiveDateTime,
        /// Length of each slot in minutes.
        #[arg(long, default_value_t = DEFAULT_SLOT_MINUTES)]
        duration: i64,
    },
    /// Show slot counts for a therapist on one day.
    Stats {
        therapist_id: String,
        #[arg(value_parser = date_arg)]
        date: NaiveDate,
    },
}

fn time_arg(value: &str) -> Result<NaiveDateTime, String> {
    parse_timestamp(value).map_err(|e| e.to_string())
}

fn slot_minutes_arg(value: &str) -> Result<i64, String> {
    let minutes = value
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid slot duration '{}': {}", value, e))?;
    validate_slot_duration(minutes).map_err(|e| e.to_string())?;
    Ok(minutes)
}

fn date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).map_err(|e| e.to_string())
}

/// Connects to the configured store and runs the parsed command.
pub async fn run(cli: Cli) -> Result<()> {
    let store_config = cli.store.to_store_config()?;
    let store = slotbook_db::connect_store(&store_config).await?;
    let policy = SlotPolicy::new(store);

    debug!("Running {:?}", cli.command);
    let output = commands::execute(&policy, &cli.command, cli.slot_duration_minutes).await?;
    println!("{}", output);

    Ok(())
}
