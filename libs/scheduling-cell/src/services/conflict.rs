use crate::models::{Booking, CandidateSlot};

/// Removes every candidate whose interval intersects a blocking booking.
///
/// Bookings are reduced to pending/confirmed before any interval comparison.
/// The three-clause test (starts inside, ends inside, fully contains) is the
/// contract: intervals are half-open, so a candidate that merely touches a
/// booking at a boundary stays available.
pub fn filter_conflicts(candidates: Vec<CandidateSlot>, bookings: &[Booking]) -> Vec<CandidateSlot> {
    let blocking: Vec<_> = bookings
        .iter()
        .filter(|b| b.status.blocks_scheduling())
        .filter_map(|b| b.interval())
        .collect();

    candidates
        .into_iter()
        .filter(|slot| {
            !blocking.iter().any(|&(booked_start, booked_end)| {
                let starts_inside = slot.start >= booked_start && slot.start < booked_end;
                let ends_inside = slot.end > booked_start && slot.end <= booked_end;
                let contains = slot.start <= booked_start && slot.end >= booked_end;
                starts_inside || ends_inside || contains
            })
        })
        .collect()
}
