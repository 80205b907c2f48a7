//! Condition Store error taxonomy.

use uuid::Uuid;

use pipeline_core::CoreError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConditionError {
    #[error("condition store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid condition: {0}")]
    Invalid(#[from] CoreError),

    #[error("condition {0} not found")]
    NotFound(Uuid),
}
