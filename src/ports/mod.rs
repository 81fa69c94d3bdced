//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AssessmentRepository` - Atomic persistence of assessment sessions
//! - `AssessmentHistoryReader` - Completed-assessment history queries
//! - `SessionValidator` - Bearer token validation (identity collaborator)

mod assessment_history_reader;
mod assessment_repository;
mod session_validator;

pub use assessment_history_reader::{AssessmentHistoryReader, AssessmentSummary};
pub use assessment_repository::{AssessmentRepository, MutationResult, SessionMutation};
pub use session_validator::SessionValidator;
