use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use scheduling_cell::models::{parse_hhmm, weekday_number, AvailabilityWindow, SchedulingError};
use scheduling_cell::services::availability::fetch_windows;
use scheduling_cell::services::slots::expand_slots;
use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{AvailabilityWindowInput, ProfessionalError, SetAvailabilityRequest};

/// Manages the recurring windows a professional declares through settings.
/// The window set is overwritten whole on edit; there is no per-window
/// deletion lifecycle.
pub struct AvailabilitySettingsService {
    store: Arc<StoreClient>,
}

impl AvailabilitySettingsService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(StoreClient::new(config)),
        }
    }

    pub fn with_store(store: Arc<StoreClient>) -> Self {
        Self { store }
    }

    /// Stored windows with missing or empty `slots` are backfilled before
    /// being returned; documents written before `slots` existed stay usable.
    pub async fn get_windows(&self, professional_id: &str) -> Result<Vec<AvailabilityWindow>> {
        debug!("Fetching availability windows for: {}", professional_id);

        fetch_windows(&self.store, professional_id)
            .await
            .map_err(|err| match err.downcast_ref::<SchedulingError>() {
                Some(SchedulingError::ProfessionalNotFound(_)) => {
                    ProfessionalError::NotFound(professional_id.to_string()).into()
                }
                _ => err,
            })
    }

    /// Validates every window eagerly, regenerates `slots` from the bounds,
    /// and replaces the whole set on the profile document.
    pub async fn set_windows(
        &self,
        professional_id: &str,
        request: SetAvailabilityRequest,
    ) -> Result<Vec<AvailabilityWindow>> {
        debug!(
            "Replacing {} availability windows for: {}",
            request.windows.len(),
            professional_id
        );

        let windows = request
            .windows
            .iter()
            .map(validate_window)
            .collect::<Result<Vec<AvailabilityWindow>, ProfessionalError>>()?;

        let body = json!({
            "availability": windows,
            "updatedAt": Utc::now().to_rfc3339()
        });

        let path = format!("/rest/v1/professionals?id=eq.{}", professional_id);
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let result: Vec<Value> = self
            .store
            .request_with_headers(Method::PATCH, &path, Some(body), Some(headers))
            .await?;

        if result.is_empty() {
            return Err(ProfessionalError::NotFound(professional_id.to_string()).into());
        }

        Ok(windows)
    }
}

fn validate_window(
    input: &AvailabilityWindowInput,
) -> Result<AvailabilityWindow, ProfessionalError> {
    if weekday_number(&input.day).is_none() {
        return Err(ProfessionalError::Validation(format!(
            "Unknown day name '{}'",
            input.day
        )));
    }

    let (Some(start), Some(end)) = (parse_hhmm(&input.start_time), parse_hhmm(&input.end_time))
    else {
        return Err(ProfessionalError::Validation(format!(
            "Times must be HH:MM for '{}'",
            input.day
        )));
    };

    if end <= start {
        return Err(ProfessionalError::Validation(format!(
            "endTime must be after startTime for '{}'",
            input.day
        )));
    }

    Ok(AvailabilityWindow {
        day: input.day.clone(),
        start_time: input.start_time.clone(),
        end_time: input.end_time.clone(),
        slots: expand_slots(&input.start_time, &input.end_time),
    })
}
