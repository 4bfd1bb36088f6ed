use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{BookingStatus, CreateBookingRequest, SchedulingError};
use crate::services::{
    availability::AvailabilityService, booking::BookingService, calendar::CalendarService,
};

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct DayRangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub months: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub professional_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub status: Option<String>,
}

#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<String>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<Value>, AppError> {
    let availability_service = AvailabilityService::new(&state);

    let slots = availability_service
        .get_available_slots(&professional_id, query.date)
        .await;

    Ok(Json(json!({
        "date": query.date,
        "slots": slots
    })))
}

#[axum::debug_handler]
pub async fn get_available_days(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<String>,
    Query(query): Query<DayRangeQuery>,
) -> Result<Json<Value>, AppError> {
    if query.end < query.start {
        return Err(AppError::BadRequest("end must not precede start".to_string()));
    }

    let availability_service = AvailabilityService::new(&state);

    let days = availability_service
        .get_available_days(query.start, query.end, &professional_id)
        .await;

    Ok(Json(json!({
        "days": days
    })))
}

#[axum::debug_handler]
pub async fn get_calendar_events(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<String>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Value>, AppError> {
    let calendar_service = CalendarService::new(&state);
    let horizon = query.months.unwrap_or(state.calendar_horizon_months);

    let events = calendar_service
        .materialize_events(&professional_id, horizon)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "events": events
    })))
}

#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Value>, AppError> {
    let statuses = match query.status.as_deref() {
        Some(token) => Some(vec![parse_status(token)?]),
        None => None,
    };

    let availability_service = AvailabilityService::new(&state);

    let bookings = availability_service
        .get_bookings(
            &query.professional_id,
            query.from,
            query.to,
            statuses.as_deref(),
        )
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "bookings": bookings
    })))
}

#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<AppConfig>>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let booking = booking_service
        .create_booking(request)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!(booking)))
}

fn parse_status(token: &str) -> Result<BookingStatus, AppError> {
    match token {
        "pending" => Ok(BookingStatus::Pending),
        "confirmed" => Ok(BookingStatus::Confirmed),
        "cancelled" => Ok(BookingStatus::Cancelled),
        "completed" => Ok(BookingStatus::Completed),
        other => Err(AppError::BadRequest(format!("Unknown status: {}", other))),
    }
}

fn map_scheduling_error(err: anyhow::Error) -> AppError {
    match err.downcast_ref::<SchedulingError>() {
        Some(SchedulingError::SlotTaken) => AppError::Conflict(err.to_string()),
        Some(SchedulingError::Validation(_)) => AppError::ValidationError(err.to_string()),
        Some(SchedulingError::ProfessionalNotFound(_)) => AppError::NotFound(err.to_string()),
        None => AppError::Internal(err.to_string()),
    }
}
