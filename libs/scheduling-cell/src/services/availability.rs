use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{
    weekday_name, AvailabilityWindow, AvailableSlot, Booking, BookingStatus, CandidateSlot,
    SchedulingError,
};
use crate::services::conflict::filter_conflicts;
use crate::services::projector::dates_for_day;
use crate::services::slots::{candidates_for_date, ensure_slots};

/// Statuses that block a slot. Cancelled and completed bookings are inert.
pub const BLOCKING_STATUSES: [BookingStatus; 2] =
    [BookingStatus::Pending, BookingStatus::Confirmed];

pub struct AvailabilityService {
    store: Arc<StoreClient>,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(StoreClient::new(config)),
        }
    }

    pub fn with_store(store: Arc<StoreClient>) -> Self {
        Self { store }
    }

    /// Reads the availability windows off the professional's profile
    /// document. Windows with a missing or empty `slots` field are repaired
    /// in memory; stored slots are never trusted when absent.
    pub async fn get_availability(&self, professional_id: &str) -> Result<Vec<AvailabilityWindow>> {
        debug!("Fetching availability for professional: {}", professional_id);
        fetch_windows(&self.store, professional_id).await
    }

    /// Reads bookings for a professional over an inclusive date range,
    /// optionally narrowed to a status set server-side.
    pub async fn get_bookings(
        &self,
        professional_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        statuses: Option<&[BookingStatus]>,
    ) -> Result<Vec<Booking>> {
        let mut path = format!(
            "/rest/v1/bookings?professionalId=eq.{}&date=gte.{}&date=lte.{}&order=date.asc,startTime.asc",
            professional_id, from, to
        );

        if let Some(statuses) = statuses {
            let list = statuses
                .iter()
                .map(BookingStatus::as_str)
                .collect::<Vec<_>>()
                .join(",");
            path.push_str(&format!("&status=in.({})", list));
        }

        let result: Vec<Value> = self.store.request(Method::GET, &path, None).await?;

        let bookings: Vec<Booking> = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Booking>, _>>()?;

        Ok(bookings)
    }

    /// Resolves the bookable slots for one professional on one date.
    ///
    /// Degrades to an empty list on any failure before candidates exist
    /// (missing profile, malformed windows): booking UIs render "no slots"
    /// and "error" as the same state. Once candidates exist, a failed booking
    /// fetch fails OPEN and the unfiltered candidates are returned.
    pub async fn get_available_slots(
        &self,
        professional_id: &str,
        date: NaiveDate,
    ) -> Vec<AvailableSlot> {
        let windows = match self.get_availability(professional_id).await {
            Ok(windows) => windows,
            Err(err) => {
                warn!(
                    "Could not load availability for {}: {}",
                    professional_id, err
                );
                return Vec::new();
            }
        };

        let candidates = candidates_for_day(&windows, date);
        if candidates.is_empty() {
            return Vec::new();
        }

        let bookings = match self
            .get_bookings(professional_id, date, date, Some(&BLOCKING_STATUSES))
            .await
        {
            Ok(bookings) => bookings,
            Err(err) => {
                warn!(
                    "Booking fetch failed for {} on {}, failing open: {}",
                    professional_id, date, err
                );
                Vec::new()
            }
        };

        let mut remaining = filter_conflicts(candidates, &bookings);
        remaining.sort_by_key(|slot| slot.start);
        remaining.dedup_by_key(|slot| slot.start);

        remaining.into_iter().map(AvailableSlot::from).collect()
    }

    /// Dates in `[from, to]` with at least one bookable slot, in order.
    /// Same degraded-state policy as slot resolution.
    pub async fn get_available_days(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        professional_id: &str,
    ) -> Vec<NaiveDate> {
        let windows = match self.get_availability(professional_id).await {
            Ok(windows) => windows,
            Err(err) => {
                warn!(
                    "Could not load availability for {}: {}",
                    professional_id, err
                );
                return Vec::new();
            }
        };

        let bookings = match self
            .get_bookings(professional_id, from, to, Some(&BLOCKING_STATUSES))
            .await
        {
            Ok(bookings) => bookings,
            Err(err) => {
                warn!(
                    "Booking fetch failed for {} over {}..{}, failing open: {}",
                    professional_id, from, to, err
                );
                Vec::new()
            }
        };

        let mut dates = BTreeSet::new();
        for window in &windows {
            dates.extend(dates_for_day(&window.day, from, to));
        }

        dates
            .into_iter()
            .filter(|date| {
                let candidates = candidates_for_day(&windows, *date);
                !filter_conflicts(candidates, &bookings).is_empty()
            })
            .collect()
    }
}

/// Direct profile read returning the availability array, with the backfill
/// policy applied: any window whose `slots` field is missing or empty is
/// regenerated from its bounds. The one place this policy lives.
pub async fn fetch_windows(
    store: &StoreClient,
    professional_id: &str,
) -> Result<Vec<AvailabilityWindow>> {
    let path = format!(
        "/rest/v1/professionals?id=eq.{}&select=availability",
        professional_id
    );
    let result: Vec<Value> = store.request(Method::GET, &path, None).await?;

    let Some(document) = result.into_iter().next() else {
        return Err(SchedulingError::ProfessionalNotFound(professional_id.to_string()).into());
    };

    let mut windows: Vec<AvailabilityWindow> = match document.get("availability") {
        Some(Value::Array(_)) => serde_json::from_value(document["availability"].clone())?,
        _ => Vec::new(),
    };

    for window in &mut windows {
        window.slots = ensure_slots(window);
    }

    Ok(windows)
}

/// Candidates for a date across every window matching its weekday; windows
/// sharing a weekday are unioned.
fn candidates_for_day(windows: &[AvailabilityWindow], date: NaiveDate) -> Vec<CandidateSlot> {
    let day = weekday_name(date);
    windows
        .iter()
        .filter(|window| window.day == day)
        .flat_map(|window| candidates_for_date(window, date))
        .collect()
}
