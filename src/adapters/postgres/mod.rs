//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresAssessmentRepository` - Assessment sessions (write side and history)

mod assessment_repository;

pub use assessment_repository::PostgresAssessmentRepository;
