//! Assessment-specific error types.

use thiserror::Error;

use crate::domain::foundation::{AssessmentId, DomainError, ErrorCode};
use crate::domain::scoring::ValidationReport;

/// Errors surfaced by assessment operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssessmentError {
    /// Section submission rejected; the report lists every violated rule.
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    /// Operation not allowed in the session's current state.
    #[error("Invalid state: {message}")]
    InvalidState { code: ErrorCode, message: String },

    /// The record changed underneath a write that required it not to.
    #[error("Concurrent modification: {0}")]
    Consistency(String),

    #[error("Assessment not found: {0}")]
    NotFound(AssessmentId),

    #[error("Permission denied")]
    Forbidden,

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl AssessmentError {
    pub fn validation(report: ValidationReport) -> Self {
        AssessmentError::Validation(report)
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        AssessmentError::InvalidState {
            code: ErrorCode::InvalidStateTransition,
            message: message.into(),
        }
    }

    pub fn already_completed() -> Self {
        AssessmentError::InvalidState {
            code: ErrorCode::AssessmentCompleted,
            message: "Assessment is completed; start a new assessment to retake it".to_string(),
        }
    }

    pub fn abandoned() -> Self {
        AssessmentError::InvalidState {
            code: ErrorCode::AssessmentAbandoned,
            message: "Assessment was abandoned".to_string(),
        }
    }

    pub fn section_missing(section: &str) -> Self {
        AssessmentError::InvalidState {
            code: ErrorCode::SectionMissing,
            message: format!("Section '{}' has not been completed", section),
        }
    }

    pub fn consistency(message: impl Into<String>) -> Self {
        AssessmentError::Consistency(message.into())
    }

    pub fn not_found(id: AssessmentId) -> Self {
        AssessmentError::NotFound(id)
    }

    pub fn forbidden() -> Self {
        AssessmentError::Forbidden
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AssessmentError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AssessmentError::Validation(_) => ErrorCode::ValidationFailed,
            AssessmentError::InvalidState { code, .. } => *code,
            AssessmentError::Consistency(_) => ErrorCode::ConcurrentModification,
            AssessmentError::NotFound(_) => ErrorCode::AssessmentNotFound,
            AssessmentError::Forbidden => ErrorCode::Forbidden,
            AssessmentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for AssessmentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Forbidden | ErrorCode::Unauthorized => AssessmentError::Forbidden,
            ErrorCode::ConcurrentModification => AssessmentError::Consistency(err.message),
            ErrorCode::InvalidStateTransition
            | ErrorCode::AssessmentCompleted
            | ErrorCode::AssessmentAbandoned
            | ErrorCode::SectionMissing => AssessmentError::InvalidState {
                code: err.code,
                message: err.message,
            },
            _ => AssessmentError::Infrastructure(err.to_string()),
        }
    }
}
