use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use shared_models::error::AppError;

/// Record kinds exposed through the generic CRUD routes, each bound to one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Patients,
    Resources,
    InsurancePlans,
    Procedures,
    AvailabilityRules,
    Bookings,
    RestrictionRules,
}

impl RecordKind {
    pub const ALL: [RecordKind; 7] = [
        RecordKind::Patients,
        RecordKind::Resources,
        RecordKind::InsurancePlans,
        RecordKind::Procedures,
        RecordKind::AvailabilityRules,
        RecordKind::Bookings,
        RecordKind::RestrictionRules,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            RecordKind::Patients => "patients",
            RecordKind::Resources => "resources",
            RecordKind::InsurancePlans => "insurance_plans",
            RecordKind::Procedures => "procedures",
            RecordKind::AvailabilityRules => "availability_rules",
            RecordKind::Bookings => "bookings",
            RecordKind::RestrictionRules => "restriction_rules",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for RecordKind {
    type Err = RecordError;

    /// Accepts the table name, with `-` allowed in place of `_`.
    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        let normalized = segment.replace('-', "_");
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.table() == normalized)
            .ok_or_else(|| RecordError::UnknownKind(segment.to_string()))
    }
}

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Unknown record kind: {0}")]
    UnknownKind(String),

    #[error("Record not found")]
    NotFound,

    #[error("Record id must be an integer, got '{0}'")]
    InvalidId(String),

    #[error("Request body must be a non-empty JSON object")]
    EmptyPayload,

    #[error("Record store failure: {0}")]
    RecordStore(#[from] anyhow::Error),
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::UnknownKind(_) | RecordError::NotFound => AppError::NotFound(err.to_string()),
            RecordError::InvalidId(_) | RecordError::EmptyPayload => AppError::BadRequest(err.to_string()),
            RecordError::RecordStore(e) => AppError::Database(e.to_string()),
        }
    }
}

pub fn parse_record_id(raw: &str) -> Result<i64, RecordError> {
    raw.parse().map_err(|_| RecordError::InvalidId(raw.to_string()))
}

/// Fields of a create/update body; rejects anything but a non-empty object.
pub fn record_fields(body: Value) -> Result<serde_json::Map<String, Value>, RecordError> {
    match body {
        Value::Object(fields) if !fields.is_empty() => Ok(fields),
        _ => Err(RecordError::EmptyPayload),
    }
}
