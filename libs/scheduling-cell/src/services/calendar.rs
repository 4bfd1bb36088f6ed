use std::sync::Arc;

use anyhow::Result;
use chrono::{Months, NaiveDate, Utc};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{parse_hhmm, AvailabilityWindow, CalendarEvent};
use crate::services::availability::AvailabilityService;
use crate::services::projector::dates_for_day;

pub struct CalendarService {
    availability: AvailabilityService,
}

impl CalendarService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            availability: AvailabilityService::new(config),
        }
    }

    pub fn with_store(store: Arc<StoreClient>) -> Self {
        Self {
            availability: AvailabilityService::with_store(store),
        }
    }

    /// Materializes a professional's recurring windows into dated calendar
    /// events over a bounded horizon starting today. The events are a
    /// projection for display and export; the windows on the profile stay
    /// authoritative.
    pub async fn materialize_events(
        &self,
        professional_id: &str,
        horizon_months: u32,
    ) -> Result<Vec<CalendarEvent>> {
        let windows = self.availability.get_availability(professional_id).await?;
        let from = Utc::now().date_naive();

        let events = project_events(professional_id, &windows, from, horizon_months);
        debug!(
            "Materialized {} calendar events for {} over {} months",
            events.len(),
            professional_id,
            horizon_months
        );

        Ok(events)
    }
}

/// Pure projection of windows onto concrete dates. Windows that do not parse
/// or have inverted bounds contribute nothing.
pub fn project_events(
    professional_id: &str,
    windows: &[AvailabilityWindow],
    from: NaiveDate,
    horizon_months: u32,
) -> Vec<CalendarEvent> {
    let to = from + Months::new(horizon_months);

    let mut events = Vec::new();
    for window in windows {
        let (Some(start), Some(end)) =
            (parse_hhmm(&window.start_time), parse_hhmm(&window.end_time))
        else {
            continue;
        };
        if end <= start {
            continue;
        }

        // Stable back-reference to the source window.
        let parent_event_id = format!("{}:{}:{}", professional_id, window.day, window.start_time);

        for date in dates_for_day(&window.day, from, to) {
            events.push(CalendarEvent {
                id: Uuid::new_v4(),
                professional_id: professional_id.to_string(),
                title: "Disponibilité".to_string(),
                start: date.and_time(start).and_utc(),
                end: date.and_time(end).and_utc(),
                is_recurring: true,
                parent_event_id: parent_event_id.clone(),
            });
        }
    }

    events.sort_by_key(|event| event.start);
    events
}
