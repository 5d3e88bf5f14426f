pub mod booking;
pub mod providers;
pub mod slots;

use slotbook_core::errors::{SlotError, SlotResult};

/// Rejects blank provider ids before they become store keys.
pub(crate) fn require_therapist_id(therapist_id: &str) -> SlotResult<&str> {
    let therapist_id = therapist_id.trim();
    if therapist_id.is_empty() {
        return Err(SlotError::Validation("Therapist ID is required".to_string()));
    }
    Ok(therapist_id)
}
