//! Axum router configuration for assessment endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    abandon_assessment, delete_assessment, get_assessment, get_catalog, get_latest_assessment,
    list_history, start_assessment, submit_section, AssessmentAppState,
};

/// Create the assessment API router.
///
/// # Routes
///
/// ## Public
/// - `GET /catalog` - Question sets for all four instruments
///
/// ## Owner endpoints (require authentication)
/// - `POST /` - Start or resume (`{retake: true}` opens a fresh attempt)
/// - `GET /latest` - Most recent non-abandoned assessment
/// - `GET /history?limit=` - Completed assessments, newest first
/// - `GET /:id` - One assessment
/// - `DELETE /:id` - Delete an assessment
/// - `POST /:id/sections/:section` - Submit one section
/// - `POST /:id/abandon` - Abandon an in-progress assessment
pub fn assessment_routes() -> Router<AssessmentAppState> {
    Router::new()
        .route("/catalog", get(get_catalog))
        .route("/", post(start_assessment))
        .route("/latest", get(get_latest_assessment))
        .route("/history", get(list_history))
        .route("/:id", get(get_assessment).delete(delete_assessment))
        .route("/:id/sections/:section", post(submit_section))
        .route("/:id/abandon", post(abandon_assessment))
}

/// Create the complete assessment module router, mounted at `/assessments`.
pub fn assessment_router() -> Router<AssessmentAppState> {
    Router::new().nest("/assessments", assessment_routes())
}
