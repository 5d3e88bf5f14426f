//! Input checks applied by callers before they reach the policy layer,
//! plus the date/time parsing and formatting shared by the HTTP and CLI fronts.

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer};

use crate::errors::{SlotError, SlotResult};

fn is_on_the_hour(time: &NaiveDateTime) -> bool {
    time.minute() == 0 && time.second() == 0 && time.nanosecond() == 0
}

fn invalid(message: impl Into<String>) -> SlotError {
    SlotError::Validation(message.into())
}

/// Single slots must start and end on the hour, so their length must be whole hours.
pub fn validate_slot_duration(minutes: i64) -> SlotResult<()> {
    if minutes <= 0 || minutes % 60 != 0 {
        return Err(invalid(format!(
            "Slot duration must be a positive multiple of 60 minutes, got {}",
            minutes
        )));
    }
    Ok(())
}

/// Checks a single appointment slot: ordered, exactly `duration` long, hour-aligned.
pub fn validate_slot_window(
    start: NaiveDateTime,
    end: NaiveDateTime,
    duration: Duration,
) -> SlotResult<()> {
    if end <= start {
        return Err(invalid("End time must be after start time"));
    }
    if end - start != duration {
        return Err(invalid(format!(
            "Appointment slots must be exactly {} minutes",
            duration.num_minutes()
        )));
    }
    if !is_on_the_hour(&start) {
        return Err(invalid("Start time must be rounded to the hour"));
    }
    if !is_on_the_hour(&end) {
        return Err(invalid("End time must be rounded to the hour"));
    }
    Ok(())
}

/// Checks an availability window before it is partitioned into slots.
pub fn validate_range_window(
    start: NaiveDateTime,
    end: NaiveDateTime,
    slot_duration_minutes: i64,
) -> SlotResult<()> {
    if slot_duration_minutes <= 0 {
        return Err(invalid("Slot duration must be a positive number of minutes"));
    }
    if end <= start {
        return Err(invalid("End time must be after start time"));
    }
    if !is_on_the_hour(&start) {
        return Err(invalid("Start time must be rounded to the hour"));
    }
    if !is_on_the_hour(&end) {
        return Err(invalid("End time must be rounded to the hour"));
    }
    Ok(())
}

/// Bookings must target a future, hour-aligned slot start.
pub fn validate_booking_time(slot_time: NaiveDateTime, now: NaiveDateTime) -> SlotResult<()> {
    if slot_time <= now {
        return Err(invalid("Booking time must be in the future"));
    }
    if !is_on_the_hour(&slot_time) {
        return Err(invalid("Booking time must be rounded to the hour"));
    }
    Ok(())
}

/// Renders a slot as `2023-06-01 10:00 - 11:00`.
pub fn format_time_slot(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{} - {}", start.format("%Y-%m-%d %H:%M"), end.format("%H:%M"))
}

/// Accepts `YYYY-MM-DD` or a full ISO-8601 timestamp, keeping only the date.
pub fn parse_date(value: &str) -> SlotResult<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_timestamp(value)
        .map(|time| time.date())
        .map_err(|_| invalid(format!("Invalid date '{}', expected YYYY-MM-DD", value)))
}

/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]`, with either `T` or a space as separator.
pub fn parse_timestamp(value: &str) -> SlotResult<NaiveDateTime> {
    let value = value.trim();
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| {
            invalid(format!(
                "Invalid timestamp '{}', expected YYYY-MM-DDTHH:MM:SS",
                value
            ))
        })
}

/// Serde adapter for request timestamps, accepting every form [`parse_timestamp`] does.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}
