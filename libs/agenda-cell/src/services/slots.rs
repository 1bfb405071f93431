use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::AgendaError;
use crate::models::{AvailabilityRule, Slot};

/// Clinic weekday number of `date`: 1 = Sunday, 2 = Monday, ... 7 = Saturday.
///
/// Computed as `(iso_weekday % 7) + 1` with the ISO numbering (Monday = 1 ... Sunday = 7),
/// which is how the stored rule weekdays were populated.
pub fn weekday_number(date: NaiveDate) -> u8 {
    (date.weekday().number_from_monday() % 7 + 1) as u8
}

/// Expand the rules of one weekday into the candidate slots of `date`.
///
/// Each rule yields `start_time + k * slot_duration` for every `k` keeping the instant
/// strictly before `end_time`. Overlapping rules are merged; the result is sorted.
pub fn generate_slots(rules: &[AvailabilityRule], date: NaiveDate) -> Result<Vec<Slot>, AgendaError> {
    let mut slots = BTreeSet::new();

    for rule in rules {
        rule.validate()?;

        let step = Duration::minutes(rule.slot_duration_minutes);
        let end = date.and_time(rule.end_time);
        let mut current = date.and_time(rule.start_time);

        while current < end {
            slots.insert(current);
            match current.checked_add_signed(step) {
                Some(next) => current = next,
                None => break,
            }
        }
    }

    Ok(slots.into_iter().collect())
}
