use serde::{Deserialize, Deserializer, Serialize};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::AgendaError;

/// A candidate bookable start instant on the requested date.
pub type Slot = NaiveDateTime;

/// Booking statuses that release the slot again.
pub const CANCELLED_STATUSES: [&str; 2] = ["CANCELLED_BY_PATIENT", "CANCELLED_BY_CLINIC"];

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Recurring weekly template for a resource.
///
/// `weekday` uses the clinic numbering: 1 = Sunday, 2 = Monday, ... 7 = Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub id: i64,
    pub resource_id: i64,
    pub weekday: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration_minutes: i64,
}

impl AvailabilityRule {
    pub fn validate(&self) -> Result<(), AgendaError> {
        if self.slot_duration_minutes <= 0 || self.slot_duration_minutes > MINUTES_PER_DAY {
            return Err(AgendaError::InvalidConfiguration {
                rule_id: self.id,
                reason: format!(
                    "slot duration must be between 1 and {} minutes, got {}",
                    MINUTES_PER_DAY, self.slot_duration_minutes
                ),
            });
        }

        if self.start_time >= self.end_time {
            return Err(AgendaError::InvalidConfiguration {
                rule_id: self.id,
                reason: format!(
                    "start time {} must be before end time {}",
                    self.start_time, self.end_time
                ),
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Absent when the lookup projects only `start_at,status`.
    #[serde(default)]
    pub resource_id: Option<i64>,
    /// Wall-clock start in the clinic's local time. An offset, as sent for
    /// `timestamptz` columns, is dropped without conversion.
    #[serde(deserialize_with = "deserialize_local_timestamp")]
    pub start_at: NaiveDateTime,
    pub status: String,
}

impl Booking {
    pub fn is_occupying(&self) -> bool {
        !CANCELLED_STATUSES.contains(&self.status.as_str())
    }
}

fn deserialize_local_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;

    if let Ok(with_offset) = raw.parse::<DateTime<FixedOffset>>() {
        return Ok(with_offset.naive_local());
    }

    raw.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|e| serde::de::Error::custom(format!("invalid timestamp '{}': {}", raw, e)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RestrictionType {
    RestrictToPlan,
    ExcludePlan,
    ContrastRequired,
    ContrastForbidden,
    /// Stored type this service does not know; never excludes a slot.
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestrictionRule {
    pub id: i64,
    pub resource_id: i64,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    pub restriction_type: RestrictionType,
    #[serde(default)]
    pub reference_id: Option<i64>,
}

impl RestrictionRule {
    /// Whether `time` falls in `[start_time, end_time)`. Missing bounds open the window
    /// to the start or end of the day.
    pub fn applies_at(&self, time: NaiveTime) -> bool {
        self.start_time.map_or(true, |start| time >= start)
            && self.end_time.map_or(true, |end| time < end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub requires_contrast: bool,
}

/// Raw query string of the available-slots endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityQueryParams {
    pub resource_id: Option<String>,
    pub date: Option<String>,
    pub plan_id: Option<String>,
    pub procedure_id: Option<String>,
}

/// Validated input of a slot computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotQuery {
    pub resource_id: i64,
    pub date: NaiveDate,
    pub plan_id: Option<i64>,
    pub procedure_id: Option<i64>,
}

impl TryFrom<&AvailabilityQueryParams> for SlotQuery {
    type Error = AgendaError;

    fn try_from(params: &AvailabilityQueryParams) -> Result<Self, Self::Error> {
        let resource_id = required(&params.resource_id, "resource_id")?;
        let resource_id = parse_id(resource_id, "resource_id")?;

        let date = required(&params.date, "date")?;
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            AgendaError::InvalidArgument(format!(
                "Parameter 'date' must be a calendar date (YYYY-MM-DD), got '{}'",
                date
            ))
        })?;
        if date.succ_opt().is_none() {
            return Err(AgendaError::InvalidArgument(format!(
                "Parameter 'date' is out of range, got '{}'",
                date
            )));
        }

        Ok(Self {
            resource_id,
            date,
            plan_id: optional_id(&params.plan_id, "plan_id")?,
            procedure_id: optional_id(&params.procedure_id, "procedure_id")?,
        })
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, AgendaError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AgendaError::InvalidArgument(format!(
            "Parameters 'resource_id' and 'date' are required (missing '{}')",
            name
        ))),
    }
}

fn optional_id(value: &Option<String>, name: &str) -> Result<Option<i64>, AgendaError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => parse_id(v, name).map(Some),
        _ => Ok(None),
    }
}

fn parse_id(value: &str, name: &str) -> Result<i64, AgendaError> {
    value.parse::<i64>().map_err(|_| {
        AgendaError::InvalidArgument(format!(
            "Parameter '{}' must be an integer identifier, got '{}'",
            name, value
        ))
    })
}
