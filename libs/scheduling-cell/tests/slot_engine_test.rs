use chrono::{Duration, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use scheduling_cell::models::{
    AvailabilityWindow, Booking, BookingStatus, CandidateSlot, BOOKING_BLOCK_MINUTES,
};
use scheduling_cell::services::conflict::filter_conflicts;
use scheduling_cell::services::slots::{candidates_for_date, ensure_slots, expand_slots};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
}

fn slot_at(hour: u32, minute: u32) -> CandidateSlot {
    let start = Utc.with_ymd_and_hms(2024, 1, 8, hour, minute, 0).unwrap();
    CandidateSlot {
        start,
        end: start + Duration::minutes(BOOKING_BLOCK_MINUTES),
    }
}

fn booking(start: &str, end: &str, status: BookingStatus) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        professional_id: "pro-1".to_string(),
        patient_id: None,
        date: monday(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        status,
        created_at: None,
    }
}

fn window(day: &str, start: &str, end: &str) -> AvailabilityWindow {
    AvailabilityWindow {
        day: day.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        slots: Vec::new(),
    }
}

#[test]
fn expansion_steps_every_thirty_minutes_and_stops_before_end() {
    assert_eq!(
        expand_slots("09:00", "11:00"),
        vec!["09:00", "09:30", "10:00", "10:30"]
    );
}

#[test]
fn expansion_is_deterministic() {
    assert_eq!(expand_slots("08:00", "12:30"), expand_slots("08:00", "12:30"));
}

#[test]
fn inverted_window_expands_to_nothing() {
    assert_eq!(expand_slots("10:00", "09:00"), Vec::<String>::new());
}

#[test]
fn missing_bound_expands_to_nothing() {
    assert_eq!(expand_slots("", "09:00"), Vec::<String>::new());
    assert_eq!(expand_slots("09:00", ""), Vec::<String>::new());
}

#[test]
fn equal_bounds_expand_to_nothing() {
    assert_eq!(expand_slots("09:00", "09:00"), Vec::<String>::new());
}

#[test]
fn end_time_itself_is_never_included() {
    let slots = expand_slots("09:00", "10:30");
    assert_eq!(slots, vec!["09:00", "09:30", "10:00"]);
}

#[test]
fn stored_slots_are_kept_when_present() {
    let mut w = window("Lundi", "09:00", "11:00");
    w.slots = vec!["09:00".to_string()];
    assert_eq!(ensure_slots(&w), vec!["09:00"]);
}

#[test]
fn empty_stored_slots_are_regenerated() {
    let w = window("Lundi", "09:00", "11:00");
    assert_eq!(ensure_slots(&w), vec!["09:00", "09:30", "10:00", "10:30"]);
}

#[test]
fn candidates_block_a_full_hour_despite_half_hour_steps() {
    let candidates = candidates_for_date(&window("Lundi", "09:00", "11:00"), monday());
    assert_eq!(candidates.len(), 4);
    for candidate in &candidates {
        assert_eq!((candidate.end - candidate.start).num_minutes(), 60);
    }
    assert_eq!(
        candidates[0].start,
        Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap()
    );
}

#[test]
fn exact_containment_is_excluded() {
    let remaining = filter_conflicts(
        vec![slot_at(10, 0)],
        &[booking("10:00", "11:00", BookingStatus::Confirmed)],
    );
    assert!(remaining.is_empty());
}

#[test]
fn boundary_touch_is_not_overlap() {
    let remaining = filter_conflicts(
        vec![slot_at(9, 0)],
        &[booking("10:00", "11:00", BookingStatus::Confirmed)],
    );
    assert_eq!(remaining, vec![slot_at(9, 0)]);
}

#[test]
fn cancelled_and_completed_bookings_never_block() {
    let remaining = filter_conflicts(
        vec![slot_at(10, 0)],
        &[
            booking("10:00", "11:00", BookingStatus::Cancelled),
            booking("10:00", "11:00", BookingStatus::Completed),
        ],
    );
    assert_eq!(remaining, vec![slot_at(10, 0)]);
}

#[test]
fn pending_bookings_block_like_confirmed_ones() {
    let remaining = filter_conflicts(
        vec![slot_at(10, 0)],
        &[booking("10:00", "11:00", BookingStatus::Pending)],
    );
    assert!(remaining.is_empty());
}

#[test]
fn slot_fully_containing_a_booking_is_excluded() {
    let remaining = filter_conflicts(
        vec![slot_at(10, 0)],
        &[booking("10:15", "10:45", BookingStatus::Confirmed)],
    );
    assert!(remaining.is_empty());
}

#[test]
fn unparseable_booking_times_do_not_block() {
    let remaining = filter_conflicts(
        vec![slot_at(10, 0)],
        &[booking("later", "whenever", BookingStatus::Confirmed)],
    );
    assert_eq!(remaining, vec![slot_at(10, 0)]);
}

#[test]
fn one_booking_clears_every_overlapping_hour_block() {
    // Window 09:00-11:00, one confirmed booking 09:30-10:30. The 09:00 and
    // 09:30 starts both collide with it through their one-hour blocks; 10:00
    // starts inside it; only 10:30 survives.
    let candidates = candidates_for_date(&window("Lundi", "09:00", "11:00"), monday());
    let remaining = filter_conflicts(
        candidates,
        &[booking("09:30", "10:30", BookingStatus::Confirmed)],
    );

    let labels: Vec<String> = remaining
        .iter()
        .map(|slot| slot.start.format("%H:%M").to_string())
        .collect();
    assert_eq!(labels, vec!["10:30"]);
}
