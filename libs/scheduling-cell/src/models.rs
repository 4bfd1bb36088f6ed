use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Enumeration step between slot start times, in minutes.
pub const SLOT_STEP_MINUTES: i64 = 30;

/// Blocking interval attached to each candidate start, in minutes.
/// Deliberately longer than the enumeration step; existing stored data and
/// client behavior depend on this exact asymmetry.
pub const BOOKING_BLOCK_MINUTES: i64 = 60;

/// Weekday vocabulary used by stored availability documents,
/// indexed 0 = Sunday .. 6 = Saturday.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Dimanche", "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi",
];

/// Maps a stored weekday name to its number. `None` for anything outside the
/// fixed vocabulary.
pub fn weekday_number(day: &str) -> Option<u32> {
    WEEKDAY_NAMES.iter().position(|d| *d == day).map(|i| i as u32)
}

/// Stored weekday name for a concrete date.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

/// One weekly recurring block on a professional profile. Times are wall-clock
/// `HH:MM` strings, matching the stored document format. `slots` is derivable
/// from the bounds and is regenerated whenever it is missing or empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityWindow {
    pub day: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Only pending and confirmed bookings block slots; the others are inert
    /// for scheduling.
    pub fn blocks_scheduling(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub professional_id: String,
    #[serde(default)]
    pub patient_id: Option<String>,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Booking {
    /// Concrete UTC interval of this booking, or `None` when the stored
    /// times do not parse.
    pub fn interval(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = parse_hhmm(&self.start_time)?;
        let end = parse_hhmm(&self.end_time)?;
        Some((
            self.date.and_time(start).and_utc(),
            self.date.and_time(end).and_utc(),
        ))
    }
}

/// Ephemeral candidate computed per query; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A bookable slot as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSlot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_minutes: i64,
    /// Wall-clock `HH:MM` label shown in booking UIs.
    pub label: String,
}

impl From<CandidateSlot> for AvailableSlot {
    fn from(slot: CandidateSlot) -> Self {
        Self {
            start_time: slot.start,
            end_time: slot.end,
            duration_minutes: (slot.end - slot.start).num_minutes(),
            label: slot.start.format("%H:%M").to_string(),
        }
    }
}

/// Materialized instance of a recurring window for a bounded horizon.
/// A projection for calendar display and export; the availability windows on
/// the profile remain the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: Uuid,
    pub professional_id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_recurring: bool,
    pub parent_event_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub professional_id: String,
    pub patient_id: Option<String>,
    pub date: NaiveDate,
    pub start_time: String,
    /// Defaults to one blocking interval after the start.
    pub end_time: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SchedulingError {
    #[error("Slot is no longer available")]
    SlotTaken,

    #[error("Invalid booking request: {0}")]
    Validation(String),

    #[error("Professional not found: {0}")]
    ProfessionalNotFound(String),
}

/// Parses a stored `HH:MM` wall-clock token.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}
