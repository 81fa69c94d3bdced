//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' must be {expected}")]
    WrongType { field: String, expected: String },

    #[error("Field '{field}' must contain exactly {expected} entries, got {actual}")]
    CountMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Field '{field}' must be at least {min} characters, got {actual}")]
    TooShort {
        field: String,
        min: usize,
        actual: usize,
    },

    #[error("Field '{field}' must contain at least {min} entries, got {actual}")]
    TooFew {
        field: String,
        min: usize,
        actual: usize,
    },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a wrong JSON type validation error.
    pub fn wrong_type(field: impl Into<String>, expected: impl Into<String>) -> Self {
        ValidationError::WrongType {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// Creates an entry count mismatch error.
    pub fn count_mismatch(field: impl Into<String>, expected: usize, actual: usize) -> Self {
        ValidationError::CountMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    /// Creates a text-too-short error.
    pub fn too_short(field: impl Into<String>, min: usize, actual: usize) -> Self {
        ValidationError::TooShort {
            field: field.into(),
            min,
            actual,
        }
    }

    /// Creates a too-few-entries error.
    pub fn too_few(field: impl Into<String>, min: usize, actual: usize) -> Self {
        ValidationError::TooFew {
            field: field.into(),
            min,
            actual,
        }
    }

    /// Returns the field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::WrongType { field, .. }
            | ValidationError::CountMismatch { field, .. }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooFew { field, .. } => field,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,

    // Not found errors
    AssessmentNotFound,

    // State errors
    InvalidStateTransition,
    AssessmentCompleted,
    AssessmentAbandoned,
    SectionMissing,
    ConcurrentModification,

    // Authorization errors
    Unauthorized,
    Forbidden,

    // Infrastructure errors
    DatabaseError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::AssessmentNotFound => "ASSESSMENT_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::AssessmentCompleted => "ASSESSMENT_COMPLETED",
            ErrorCode::AssessmentAbandoned => "ASSESSMENT_ABANDONED",
            ErrorCode::SectionMissing => "SECTION_MISSING",
            ErrorCode::ConcurrentModification => "CONCURRENT_MODIFICATION",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a database error, keeping the underlying cause in the message.
    pub fn database(context: &str, cause: impl fmt::Display) -> Self {
        Self::new(ErrorCode::DatabaseError, format!("{}: {}", context, cause))
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
