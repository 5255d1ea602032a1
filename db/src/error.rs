//! Error type shared by the progress, quiz and certificate operations.
//!
//! Every failure carries a stable [`CoreError::code`] so callers can tell "not
//! enrolled" apart from "prerequisites missing" or "come back later".

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The named entity (`"lesson"`, `"quiz"`, `"course"`) does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("student is not enrolled in this course")]
    NotEnrolled,

    #[error("prerequisites not completed: {missing:?}")]
    PrerequisitesIncomplete { missing: Vec<i64> },

    #[error("lesson is not available until {available_at}")]
    NotYetAvailable { available_at: DateTime<Utc> },

    #[error("student is already enrolled in this course")]
    AlreadyEnrolled,

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// Coarse failure category used by the HTTP layer to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    PreconditionFailed,
    Conflict,
    Internal,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::NotFound(_) => ErrorKind::NotFound,
            CoreError::NotEnrolled => ErrorKind::Forbidden,
            CoreError::PrerequisitesIncomplete { .. } | CoreError::NotYetAvailable { .. } => {
                ErrorKind::PreconditionFailed
            }
            CoreError::AlreadyEnrolled => ErrorKind::Conflict,
            CoreError::Database(_) => ErrorKind::Internal,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CoreError::NotFound(_) => "NOT_FOUND",
            CoreError::NotEnrolled => "NOT_ENROLLED",
            CoreError::PrerequisitesIncomplete { .. } => "PREREQUISITES_INCOMPLETE",
            CoreError::NotYetAvailable { .. } => "NOT_YET_AVAILABLE",
            CoreError::AlreadyEnrolled => "ALREADY_ENROLLED",
            CoreError::Database(_) => "INTERNAL",
        }
    }
}
