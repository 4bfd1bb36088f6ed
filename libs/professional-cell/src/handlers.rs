use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{ProfessionalError, SetAvailabilityRequest, UpdateProfileRequest};
use crate::services::{availability::AvailabilitySettingsService, profile::ProfileService};

#[axum::debug_handler]
pub async fn get_professional(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let profile_service = ProfileService::new(&state);

    let profile = profile_service
        .get_profile(&professional_id)
        .await
        .map_err(map_professional_error)?;

    Ok(Json(json!(profile)))
}

#[axum::debug_handler]
pub async fn update_professional(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<String>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let profile_service = ProfileService::new(&state);

    let profile = profile_service
        .update_profile(&professional_id, request)
        .await
        .map_err(map_professional_error)?;

    Ok(Json(json!(profile)))
}

#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let settings_service = AvailabilitySettingsService::new(&state);

    let windows = settings_service
        .get_windows(&professional_id)
        .await
        .map_err(map_professional_error)?;

    Ok(Json(json!({
        "availability": windows
    })))
}

#[axum::debug_handler]
pub async fn set_availability(
    State(state): State<Arc<AppConfig>>,
    Path(professional_id): Path<String>,
    Json(request): Json<SetAvailabilityRequest>,
) -> Result<Json<Value>, AppError> {
    let settings_service = AvailabilitySettingsService::new(&state);

    let windows = settings_service
        .set_windows(&professional_id, request)
        .await
        .map_err(map_professional_error)?;

    Ok(Json(json!({
        "availability": windows
    })))
}

fn map_professional_error(err: anyhow::Error) -> AppError {
    match err.downcast_ref::<ProfessionalError>() {
        Some(ProfessionalError::NotFound(_)) => AppError::NotFound(err.to_string()),
        Some(ProfessionalError::Validation(_)) => AppError::ValidationError(err.to_string()),
        None => AppError::Internal(err.to_string()),
    }
}
