use chrono::{Duration, NaiveDate};

use crate::models::{
    parse_hhmm, AvailabilityWindow, CandidateSlot, BOOKING_BLOCK_MINUTES, SLOT_STEP_MINUTES,
};

/// Expands a window into `HH:MM` start times at the fixed step, starting at
/// `start_time` and stopping strictly before `end_time`.
///
/// Malformed input fails soft: a missing bound or an inverted range yields an
/// empty sequence, never an error, so a bad window contributes zero bookable
/// slots instead of taking the whole schedule down.
pub fn expand_slots(start_time: &str, end_time: &str) -> Vec<String> {
    let (Some(start), Some(end)) = (parse_hhmm(start_time), parse_hhmm(end_time)) else {
        return Vec::new();
    };

    if end <= start {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut current = start;
    while current < end {
        slots.push(current.format("%H:%M").to_string());
        let next = current + Duration::minutes(SLOT_STEP_MINUTES);
        if next <= current {
            // Wrapped past midnight; the window is done.
            break;
        }
        current = next;
    }

    slots
}

/// Returns the slot tokens for a stored window, regenerating them from the
/// bounds when the stored field is missing or empty. This doubles as the
/// migration path for documents written before `slots` existed.
pub fn ensure_slots(window: &AvailabilityWindow) -> Vec<String> {
    if !window.slots.is_empty() {
        return window.slots.clone();
    }
    expand_slots(&window.start_time, &window.end_time)
}

/// Anchors a window's slot tokens on a concrete date as candidate intervals.
/// Each candidate blocks a full `BOOKING_BLOCK_MINUTES` interval even though
/// starts are enumerated every `SLOT_STEP_MINUTES`.
pub fn candidates_for_date(window: &AvailabilityWindow, date: NaiveDate) -> Vec<CandidateSlot> {
    ensure_slots(window)
        .iter()
        .filter_map(|token| parse_hhmm(token))
        .map(|time| {
            let start = date.and_time(time).and_utc();
            CandidateSlot {
                start,
                end: start + Duration::minutes(BOOKING_BLOCK_MINUTES),
            }
        })
        .collect()
}
