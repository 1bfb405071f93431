use std::sync::Arc;

use chrono::{NaiveTime, Timelike};
use tracing::{debug, warn};

use shared_database::supabase::SupabaseClient;

use crate::error::AgendaError;
use crate::models::{AvailabilityQueryParams, RestrictionType, Slot, SlotQuery};
use crate::services::occupancy::exclude_occupied;
use crate::services::restrictions::{apply_restrictions, RestrictionContext};
use crate::services::slots::{generate_slots, weekday_number};
use crate::services::store::{ScheduleStore, SupabaseScheduleStore};

/// Computes the bookable slots of a resource for one day.
///
/// Stateless between calls; one instance is shared by all requests.
pub struct AvailabilityService {
    store: Arc<dyn ScheduleStore>,
}

impl AvailabilityService {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self::with_store(Arc::new(SupabaseScheduleStore::new(supabase)))
    }

    pub fn with_store(store: Arc<dyn ScheduleStore>) -> Self {
        Self { store }
    }

    /// Validate the raw request parameters, then compute the available slots.
    ///
    /// Fails with `InvalidArgument` before touching the record store when
    /// `resource_id` or `date` is missing or malformed.
    pub async fn compute_available_slots(
        &self,
        params: &AvailabilityQueryParams,
    ) -> Result<Vec<NaiveTime>, AgendaError> {
        let query = SlotQuery::try_from(params)?;
        self.available_slots_for(&query).await
    }

    /// Available start times of `query.resource_id` on `query.date`, chronological
    /// and without duplicates.
    pub async fn available_slots_for(&self, query: &SlotQuery) -> Result<Vec<NaiveTime>, AgendaError> {
        debug!("Calculating available slots for resource {} on {}", query.resource_id, query.date);

        let weekday = weekday_number(query.date);
        let rules = self.store.availability_rules(query.resource_id, weekday).await?;
        if rules.is_empty() {
            debug!("Resource {} has no availability rules for weekday {}", query.resource_id, weekday);
            return Ok(vec![]);
        }

        let candidates = generate_slots(&rules, query.date)?;

        let occupied = self.store.occupied_starts(query.resource_id, query.date).await?;
        let free = exclude_occupied(&candidates, &occupied);
        let free_count = free.len();

        let restrictions = self.store.restriction_rules(query.resource_id).await?;
        let allowed = if restrictions.is_empty() {
            free
        } else {
            for rule in restrictions.iter().filter(|r| r.restriction_type == RestrictionType::Unrecognized) {
                warn!("Ignoring restriction rule {} with unrecognized type", rule.id);
            }

            let procedure = match query.procedure_id {
                Some(procedure_id) => {
                    let procedure = self.store.procedure(procedure_id).await?;
                    if procedure.is_none() {
                        debug!("Procedure {} not found, evaluating without procedure", procedure_id);
                    }
                    procedure
                }
                None => None,
            };

            let context = RestrictionContext {
                plan_id: query.plan_id,
                procedure: procedure.as_ref(),
            };
            apply_restrictions(&free, &restrictions, &context)
        };

        debug!(
            "Resource {} on {}: {} candidates, {} free, {} allowed",
            query.resource_id,
            query.date,
            candidates.len(),
            free_count,
            allowed.len()
        );

        Ok(to_times_of_day(&allowed))
    }
}

/// Minute-resolution times of `slots`, which must be chronological.
fn to_times_of_day(slots: &[Slot]) -> Vec<NaiveTime> {
    let mut times: Vec<NaiveTime> = slots
        .iter()
        .map(|slot| {
            let time = slot.time();
            time.with_second(0)
                .and_then(|t| t.with_nanosecond(0))
                .unwrap_or(time)
        })
        .collect();
    times.dedup();
    times
}
