use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info};

use shared_database::supabase::SupabaseClient;

use crate::models::{record_fields, RecordError, RecordKind};

/// Typed create/read/update/delete over the record store tables.
pub struct RecordService {
    supabase: Arc<SupabaseClient>,
}

impl RecordService {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }

    pub async fn list(&self, kind: RecordKind) -> Result<Vec<Value>, RecordError> {
        debug!("Listing {}", kind);

        let path = format!("/rest/v1/{}?order=id.asc", kind.table());
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get(&self, kind: RecordKind, id: i64) -> Result<Value, RecordError> {
        debug!("Fetching {} {}", kind, id);

        let path = format!("/rest/v1/{}?id=eq.{}&limit=1", kind.table(), id);
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        rows.into_iter().next().ok_or(RecordError::NotFound)
    }

    /// Insert a row and return its id.
    pub async fn create(&self, kind: RecordKind, body: Value) -> Result<Value, RecordError> {
        let fields = record_fields(body)?;

        let path = format!("/rest/v1/{}", kind.table());
        let rows = self.supabase
            .request_returning(Method::POST, &path, Some(Value::Object(fields)))
            .await?;

        let id = rows
            .first()
            .and_then(|row| row.get("id"))
            .cloned()
            .unwrap_or(Value::Null);

        info!("Created {} {}", kind, id);
        Ok(id)
    }

    /// Update a row and return how many rows changed.
    pub async fn update(&self, kind: RecordKind, id: i64, body: Value) -> Result<usize, RecordError> {
        let fields = record_fields(body)?;

        let path = format!("/rest/v1/{}?id=eq.{}", kind.table(), id);
        let rows = self.supabase
            .request_returning(Method::PATCH, &path, Some(Value::Object(fields)))
            .await?;

        if rows.is_empty() {
            return Err(RecordError::NotFound);
        }

        info!("Updated {} {}", kind, id);
        Ok(rows.len())
    }

    /// Delete a row and return how many rows were removed.
    pub async fn delete(&self, kind: RecordKind, id: i64) -> Result<usize, RecordError> {
        let path = format!("/rest/v1/{}?id=eq.{}", kind.table(), id);
        let rows = self.supabase
            .request_returning(Method::DELETE, &path, None)
            .await?;

        if rows.is_empty() {
            return Err(RecordError::NotFound);
        }

        info!("Deleted {} {}", kind, id);
        Ok(rows.len())
    }
}
