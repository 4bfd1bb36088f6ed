use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::StoreClient;

use crate::models::{
    validate_category_consistency, ProfessionalError, ProfessionalProfile, ProfileDocument,
    UpdateProfileRequest,
};

pub struct ProfileService {
    store: Arc<StoreClient>,
}

impl ProfileService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: Arc::new(StoreClient::new(config)),
        }
    }

    pub fn with_store(store: Arc<StoreClient>) -> Self {
        Self { store }
    }

    /// Direct document read followed by the one normalization step; callers
    /// only ever see the canonical shape.
    pub async fn get_profile(&self, professional_id: &str) -> Result<ProfessionalProfile> {
        debug!("Fetching profile for professional: {}", professional_id);

        let path = format!("/rest/v1/professionals?id=eq.{}", professional_id);
        let result: Vec<Value> = self.store.request(Method::GET, &path, None).await?;

        let Some(document) = result.into_iter().next() else {
            return Err(ProfessionalError::NotFound(professional_id.to_string()).into());
        };

        let document: ProfileDocument = serde_json::from_value(document)?;
        Ok(document.normalize())
    }

    /// Validates eagerly, then writes the canonical field vocabulary; a
    /// legacy document is upgraded in place by its first successful update.
    pub async fn update_profile(
        &self,
        professional_id: &str,
        request: UpdateProfileRequest,
    ) -> Result<ProfessionalProfile> {
        debug!("Updating profile for professional: {}", professional_id);

        let current = self.get_profile(professional_id).await?;

        let category = request.category.unwrap_or(current.category);
        let specialties = request.specialties.unwrap_or(current.specialties);

        validate_category_consistency(&category, &specialties)
            .map_err(ProfessionalError::Validation)?;

        let mut update_data = serde_json::Map::new();
        if let Some(full_name) = request.full_name {
            update_data.insert("fullName".to_string(), json!(full_name));
        }
        if let Some(bio) = request.bio {
            update_data.insert("bio".to_string(), json!(bio));
        }
        update_data.insert("category".to_string(), json!(category));
        update_data.insert("specialties".to_string(), json!(specialties));
        update_data.insert("updatedAt".to_string(), json!(Utc::now().to_rfc3339()));

        let path = format!("/rest/v1/professionals?id=eq.{}", professional_id);
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let result: Vec<Value> = self
            .store
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(Value::Object(update_data)),
                Some(headers),
            )
            .await?;

        let Some(updated) = result.into_iter().next() else {
            return Err(ProfessionalError::NotFound(professional_id.to_string()).into());
        };

        let document: ProfileDocument = serde_json::from_value(updated)?;
        Ok(document.normalize())
    }
}
