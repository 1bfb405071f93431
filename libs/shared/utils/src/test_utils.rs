use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_service_key: Option<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
            supabase_service_key: None,
        }
    }
}

impl TestConfig {
    /// Points the record store at a mock server (usually `MockServer::uri()`).
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            supabase_url: url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            supabase_service_key: self.supabase_service_key.clone(),
            record_store_timeout_secs: 5,
            port: 3000,
        }
    }
}

/// Rows shaped like the record store's PostgREST responses.
pub struct MockRecordStoreResponses;

impl MockRecordStoreResponses {
    pub fn availability_rule(
        id: i64,
        resource_id: i64,
        weekday: u8,
        start_time: &str,
        end_time: &str,
        slot_duration_minutes: i64,
    ) -> Value {
        json!({
            "id": id,
            "resource_id": resource_id,
            "weekday": weekday,
            "start_time": start_time,
            "end_time": end_time,
            "slot_duration_minutes": slot_duration_minutes
        })
    }

    pub fn booking(start_at: &str, status: &str) -> Value {
        json!({
            "start_at": start_at,
            "status": status
        })
    }

    pub fn restriction_rule(
        id: i64,
        resource_id: i64,
        restriction_type: &str,
        reference_id: Option<i64>,
        window: Option<(&str, &str)>,
    ) -> Value {
        json!({
            "id": id,
            "resource_id": resource_id,
            "start_time": window.map(|(start, _)| start),
            "end_time": window.map(|(_, end)| end),
            "restriction_type": restriction_type,
            "reference_id": reference_id
        })
    }

    pub fn procedure(id: i64, name: &str, requires_contrast: bool) -> Value {
        json!({
            "id": id,
            "name": name,
            "requires_contrast": requires_contrast
        })
    }
}
