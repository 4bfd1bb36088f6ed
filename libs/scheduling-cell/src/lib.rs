pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;

pub use services::availability::{fetch_windows, AvailabilityService, BLOCKING_STATUSES};
pub use services::booking::BookingService;
pub use services::calendar::{project_events, CalendarService};
pub use services::conflict::filter_conflicts;
pub use services::projector::dates_for_day;
pub use services::slots::{candidates_for_date, ensure_slots, expand_slots};
