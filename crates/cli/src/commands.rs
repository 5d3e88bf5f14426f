use chrono::{Duration, Local, NaiveDateTime};
use eyre::{eyre, Result};
use slotbook_core::{
    errors::SlotError,
    models::slot::SlotRecord,
    validation::{
        format_time_slot, validate_booking_time, validate_range_window, validate_slot_window,
    },
    SlotPolicy,
};

use crate::Commands;

fn rejected(message: &str) -> eyre::Report {
    SlotError::Rejected(message.to_string()).into()
}

fn format_instant(time: NaiveDateTime) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

/// Numbered listing, one slot per line. Booked slots are tagged when `show_status` is set.
pub fn format_slot_list(slots: &[SlotRecord], show_status: bool) -> String {
    slots
        .iter()
        .enumerate()
        .map(|(i, slot)| {
            let line = format!("  {}. {}", i + 1, format_time_slot(slot.start_time, slot.end_time));
            if show_status {
                format!("{} ({})", line, slot.status)
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Runs one command and returns the text to print.
pub async fn execute(
    policy: &SlotPolicy,
    command: &Commands,
    slot_duration_minutes: i64,
) -> Result<String> {
    match command {
        Commands::CreateSlot {
            therapist_id,
            start_time,
            end_time,
        } => {
            let duration = Duration::try_minutes(slot_duration_minutes)
                .ok_or_else(|| eyre!("Slot duration out of range"))?;
            validate_slot_window(*start_time, *end_time, duration)?;

            if !policy.create_slot(therapist_id, *start_time, *end_time).await? {
                return Err(rejected(
                    "Failed to create slot. The slot may overlap with existing slots.",
                ));
            }
            Ok(format!(
                "Slot created successfully: {}",
                format_time_slot(*start_time, *end_time)
            ))
        }
        Commands::ListSlots {
            therapist_id,
            date,
            all,
        } => {
            let slots = if *all {
                policy.list_all_slots(therapist_id, *date).await
            } else {
                policy.list_available_slots(therapist_id, *date).await
            };
            let kind = if *all { "Slots" } else { "Available slots" };

            if slots.is_empty() {
                return Ok(format!(
                    "No {} for therapist {} on {}",
                    kind.to_lowercase(),
                    therapist_id,
                    date
                ));
            }
            Ok(format!(
                "{} for therapist {} on {}:\n{}",
                kind,
                therapist_id,
                date,
                format_slot_list(&slots, *all)
            ))
        }
        Commands::BookSlot {
            therapist_id,
            slot_time,
        } => {
            validate_booking_time(*slot_time, Local::now().naive_local())?;

            if !policy.book_slot(therapist_id, *slot_time).await? {
                return Err(rejected(
                    "Failed to book slot. The slot may not exist or is already booked.",
                ));
            }
            Ok(format!(
                "Slot booked successfully: {}",
                format_instant(*slot_time)
            ))
        }
        Commands::CancelBooking {
            therapist_id,
            slot_time,
        } => {
            if !policy.cancel_booking(therapist_id, *slot_time).await? {
                return Err(rejected(
                    "Failed to cancel booking. The slot may not exist or is not booked.",
                ));
            }
            Ok(format!(
                "Booking canceled successfully: {}",
                format_instant(*slot_time)
            ))
        }
        Commands::CreateRange {
            therapist_id,
            start_time,
            end_time,
            duration,
        } => {
            validate_range_window(*start_time, *end_time, *duration)?;

            if !policy
                .create_availability_range(therapist_id, *start_time, *end_time, *duration)
                .await?
            {
                return Err(rejected(
                    "Failed to create availability. No free slots fit in the requested range.",
                ));
            }
            Ok(format!(
                "Availability created for therapist {}: {} - {} in {} minute slots",
                therapist_id,
                format_instant(*start_time),
                format_instant(*end_time),
                duration
            ))
        }
        Commands::Stats { therapist_id, date } => {
            let stats = policy.provider_stats(therapist_id, *date).await;
            Ok(format!(
                "Therapist {} on {}: {} total, {} available, {} booked",
                stats.therapist_id,
                stats.date,
                stats.total_slots,
                stats.available_slots,
                stats.booked_slots
            ))
        }
    }
}
