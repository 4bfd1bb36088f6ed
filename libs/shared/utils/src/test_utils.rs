use std::sync::Arc;

use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub store_url: String,
    pub store_service_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            store_url: "http://localhost:54321".to_string(),
            store_service_key: "test-service-key".to_string(),
        }
    }
}

impl TestConfig {
    pub fn with_store_url(url: &str) -> Self {
        Self {
            store_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            store_url: self.store_url.clone(),
            store_service_key: self.store_service_key.clone(),
            calendar_horizon_months: 3,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Canned store documents shared across cell tests.
pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn professional_response(id: &str, full_name: &str, category: &str) -> Value {
        json!({
            "id": id,
            "fullName": full_name,
            "category": category,
            "specialties": ["Médecine générale"],
            "availability": [],
            "createdAt": chrono::Utc::now().to_rfc3339(),
            "updatedAt": chrono::Utc::now().to_rfc3339()
        })
    }

    pub fn availability_window(day: &str, start: &str, end: &str) -> Value {
        json!({
            "day": day,
            "startTime": start,
            "endTime": end,
            "slots": []
        })
    }

    pub fn booking_response(
        id: &str,
        professional_id: &str,
        date: &str,
        start: &str,
        end: &str,
        status: &str,
    ) -> Value {
        json!({
            "id": id,
            "professionalId": professional_id,
            "date": date,
            "startTime": start,
            "endTime": end,
            "status": status,
            "createdAt": chrono::Utc::now().to_rfc3339()
        })
    }
}
