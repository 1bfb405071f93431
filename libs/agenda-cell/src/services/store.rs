use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Method;
use tracing::debug;

use shared_database::supabase::SupabaseClient;

use crate::error::AgendaError;
use crate::models::{AvailabilityRule, Booking, Procedure, RestrictionRule, CANCELLED_STATUSES};

/// Read-only lookups the availability engine needs from the record store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Rules of `resource_id` for a clinic weekday, ordered by start time then id.
    async fn availability_rules(
        &self,
        resource_id: i64,
        weekday: u8,
    ) -> Result<Vec<AvailabilityRule>, AgendaError>;

    /// Start instants of the non-cancelled bookings of `resource_id` on `date`.
    async fn occupied_starts(
        &self,
        resource_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<NaiveDateTime>, AgendaError>;

    /// Restriction rules of `resource_id`, ordered by id.
    async fn restriction_rules(&self, resource_id: i64) -> Result<Vec<RestrictionRule>, AgendaError>;

    async fn procedure(&self, procedure_id: i64) -> Result<Option<Procedure>, AgendaError>;
}

/// `ScheduleStore` backed by the PostgREST record store.
pub struct SupabaseScheduleStore {
    supabase: Arc<SupabaseClient>,
}

impl SupabaseScheduleStore {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }
}

#[async_trait]
impl ScheduleStore for SupabaseScheduleStore {
    async fn availability_rules(
        &self,
        resource_id: i64,
        weekday: u8,
    ) -> Result<Vec<AvailabilityRule>, AgendaError> {
        let path = format!(
            "/rest/v1/availability_rules?resource_id=eq.{}&weekday=eq.{}&order=start_time.asc,id.asc",
            resource_id, weekday
        );
        let rules: Vec<AvailabilityRule> = self.supabase.request(Method::GET, &path, None).await?;

        debug!("Loaded {} availability rules for resource {} on weekday {}", rules.len(), resource_id, weekday);
        Ok(rules)
    }

    async fn occupied_starts(
        &self,
        resource_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<NaiveDateTime>, AgendaError> {
        let next_day = date.succ_opt().ok_or_else(|| {
            AgendaError::InvalidArgument(format!("Date {} is out of range", date))
        })?;

        let path = format!(
            "/rest/v1/bookings?select=start_at,status&resource_id=eq.{}&start_at=gte.{}T00:00:00&start_at=lt.{}T00:00:00&status=not.in.({})",
            resource_id,
            date,
            next_day,
            CANCELLED_STATUSES.join(",")
        );
        let bookings: Vec<Booking> = self.supabase.request(Method::GET, &path, None).await?;

        let starts: Vec<NaiveDateTime> = bookings
            .into_iter()
            .filter(Booking::is_occupying)
            .map(|booking| booking.start_at)
            .collect();

        debug!("Resource {} has {} occupying bookings on {}", resource_id, starts.len(), date);
        Ok(starts)
    }

    async fn restriction_rules(&self, resource_id: i64) -> Result<Vec<RestrictionRule>, AgendaError> {
        let path = format!(
            "/rest/v1/restriction_rules?resource_id=eq.{}&order=id.asc",
            resource_id
        );
        let rules: Vec<RestrictionRule> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rules)
    }

    async fn procedure(&self, procedure_id: i64) -> Result<Option<Procedure>, AgendaError> {
        let path = format!("/rest/v1/procedures?id=eq.{}&limit=1", procedure_id);
        let procedures: Vec<Procedure> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(procedures.into_iter().next())
    }
}
