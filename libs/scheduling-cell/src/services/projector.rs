use chrono::{Datelike, Duration, NaiveDate};
use tracing::warn;

use crate::models::weekday_number;

/// Enumerates every concrete date in `[from, to]` that falls on the named
/// weekday. Unknown day names warn and contribute nothing; a stored typo must
/// never take down the whole schedule.
pub fn dates_for_day(day: &str, from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    let Some(target) = weekday_number(day) else {
        warn!("Unknown weekday name in availability window: {}", day);
        return Vec::new();
    };

    if to < from {
        return Vec::new();
    }

    // Jump to the first matching date, then step a week at a time.
    let offset = (7 + target - from.weekday().num_days_from_sunday()) % 7;
    let mut current = from + Duration::days(offset as i64);

    let mut dates = Vec::new();
    while current <= to {
        dates.push(current);
        current += Duration::days(7);
    }

    dates
}
