//! Schedule error types.
//!
//! Every failure aborts the whole generation call; there is no partial
//! result. Each variant knows its API error code and HTTP status.

use immobook_shared::AppError;
use thiserror::Error;

/// Errors that can occur while generating a booking schedule.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The source record does not exist.
    #[error("{source_type} not found: {id}")]
    NotFound {
        /// Source type that was looked up.
        source_type: String,
        /// Identifier that was looked up.
        id: String,
    },

    /// A required field of the source record is missing, zero or negative.
    #[error("Invalid source data: {0}")]
    InvalidSourceData(String),

    /// The cadence cannot advance or is malformed.
    #[error("Invalid cadence: {0}")]
    InvalidCadence(String),

    /// The requested source type is not one of the supported kinds.
    #[error("Unknown source type: {0}")]
    UnknownSourceType(String),

    /// A decimal computation left the representable range.
    #[error("Arithmetic overflow: {0}")]
    ArithmeticOverflow(String),

    /// The storage collaborator failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ScheduleError {
    /// Creates a `NotFound` error for the given source type and id.
    pub fn not_found(source_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            source_type: source_type.into(),
            id: id.to_string(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidSourceData(_) => "INVALID_SOURCE_DATA",
            Self::InvalidCadence(_) => "INVALID_CADENCE",
            Self::UnknownSourceType(_) => "UNKNOWN_SOURCE_TYPE",
            Self::ArithmeticOverflow(_) => "ARITHMETIC_OVERFLOW",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::InvalidSourceData(_)
            | Self::InvalidCadence(_)
            | Self::UnknownSourceType(_) => 400,
            Self::ArithmeticOverflow(_) | Self::Storage(_) => 500,
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        match err {
            ScheduleError::NotFound { .. } => Self::NotFound(err.to_string()),
            ScheduleError::InvalidSourceData(_)
            | ScheduleError::InvalidCadence(_)
            | ScheduleError::UnknownSourceType(_) => Self::Validation(err.to_string()),
            ScheduleError::Storage(msg) => Self::Database(msg),
            ScheduleError::ArithmeticOverflow(_) => Self::Internal(err.to_string()),
        }
    }
}
