//! In-memory adapters for tests and local development.

mod assessment_store;

pub use assessment_store::InMemoryAssessmentRepository;
