use thiserror::Error;

use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum AgendaError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid availability rule {rule_id}: {reason}")]
    InvalidConfiguration { rule_id: i64, reason: String },

    #[error("Record store failure: {0}")]
    RecordStore(#[from] anyhow::Error),
}

impl From<AgendaError> for AppError {
    fn from(err: AgendaError) -> Self {
        match err {
            AgendaError::InvalidArgument(msg) => AppError::BadRequest(msg),
            AgendaError::InvalidConfiguration { .. } => AppError::Internal(err.to_string()),
            AgendaError::RecordStore(e) => AppError::Database(e.to_string()),
        }
    }
}
