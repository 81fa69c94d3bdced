//! HTTP adapter for assessment endpoints.
//!
//! Exposes the assessment engine via REST API under `/api/assessments`.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{AssessmentApiError, AssessmentAppState};
pub use routes::{assessment_router, assessment_routes};
