use std::sync::Arc;

use anyhow::Result;
use chrono::{Duration, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{
    parse_hhmm, Booking, CandidateSlot, CreateBookingRequest, SchedulingError,
    BOOKING_BLOCK_MINUTES,
};
use crate::services::availability::{AvailabilityService, BLOCKING_STATUSES};
use crate::services::conflict::filter_conflicts;

pub struct BookingService {
    store: Arc<StoreClient>,
    availability: AvailabilityService,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        let store = Arc::new(StoreClient::new(config));
        Self {
            availability: AvailabilityService::with_store(Arc::clone(&store)),
            store,
        }
    }

    /// Creates a pending booking. The pre-check and the write are not atomic,
    /// so the insert itself is conditional on the composite
    /// professional/date/startTime key; losing the race surfaces as
    /// `SchedulingError::SlotTaken`, never as a silent double booking.
    pub async fn create_booking(&self, request: CreateBookingRequest) -> Result<Booking> {
        debug!(
            "Booking request for {} on {} at {}",
            request.professional_id, request.date, request.start_time
        );

        let start = parse_hhmm(&request.start_time)
            .ok_or_else(|| SchedulingError::Validation("startTime must be HH:MM".to_string()))?;

        let end_token = match &request.end_time {
            Some(token) => {
                let end = parse_hhmm(token).ok_or_else(|| {
                    SchedulingError::Validation("endTime must be HH:MM".to_string())
                })?;
                if end <= start {
                    return Err(SchedulingError::Validation(
                        "endTime must be after startTime".to_string(),
                    )
                    .into());
                }
                token.clone()
            }
            None => {
                let end = start + Duration::minutes(BOOKING_BLOCK_MINUTES);
                // NaiveTime addition wraps at midnight, which would persist
                // an inverted interval no conflict check could ever match.
                if end <= start {
                    return Err(SchedulingError::Validation(
                        "booking cannot extend past midnight".to_string(),
                    )
                    .into());
                }
                end.format("%H:%M").to_string()
            }
        };

        let candidate = CandidateSlot {
            start: request.date.and_time(start).and_utc(),
            end: request
                .date
                .and_time(parse_hhmm(&end_token).unwrap_or(start))
                .and_utc(),
        };

        let bookings = self
            .availability
            .get_bookings(
                &request.professional_id,
                request.date,
                request.date,
                Some(&BLOCKING_STATUSES),
            )
            .await?;

        if filter_conflicts(vec![candidate], &bookings).is_empty() {
            return Err(SchedulingError::SlotTaken.into());
        }

        let booking_data = json!({
            "id": Uuid::new_v4(),
            "professionalId": request.professional_id,
            "patientId": request.patient_id,
            "date": request.date,
            "startTime": request.start_time,
            "endTime": end_token,
            "status": "pending",
            "createdAt": Utc::now().to_rfc3339()
        });

        let mut headers = HeaderMap::new();
        headers.insert(
            "Prefer",
            HeaderValue::from_static("return=representation,resolution=ignore-duplicates"),
        );

        let result: Vec<Value> = self
            .store
            .request_with_headers(
                Method::POST,
                "/rest/v1/bookings?on_conflict=professionalId,date,startTime",
                Some(booking_data),
                Some(headers),
            )
            .await?;

        // An ignored duplicate comes back as an empty representation: another
        // patient won the slot between the pre-check and the insert.
        let Some(created) = result.into_iter().next() else {
            return Err(SchedulingError::SlotTaken.into());
        };

        let booking: Booking = serde_json::from_value(created)?;
        info!("Booking {} created for {}", booking.id, booking.professional_id);

        Ok(booking)
    }
}
