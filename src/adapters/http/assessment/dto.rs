//! HTTP DTOs (Data Transfer Objects) for assessment endpoints.
//!
//! Request and response bodies use camelCase keys, matching the stored
//! section payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::assessment::{AssessmentProgress, AssessmentSession, SessionTransition};
use crate::domain::foundation::{AssessmentStatus, Timestamp};
use crate::domain::instrument::catalog::{
    self, BrainStatementSet, InterestQuestion, StepsQuestion, MIN_INSIGHT_SELECTIONS,
    MIN_INSIGHT_TEXT_CHARS,
};
use crate::domain::instrument::BrainQuadrant;
use crate::domain::scoring::{SectionInterpretation, SectionScores, ValidationReport};
use crate::ports::AssessmentSummary;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to start or resume an assessment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAssessmentRequest {
    /// Abandon the current in-progress attempt and open a new one.
    #[serde(default)]
    pub retake: bool,
}

/// Request to submit one section.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSectionRequest {
    /// Untyped raw responses; validated against the instrument contract.
    pub raw_responses: Value,
    #[serde(default)]
    pub time_spent_minutes: u32,
}

/// Query parameters for the history endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Scored section as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub scores: SectionScores,
    pub interpretation: SectionInterpretation,
    pub time_spent_minutes: u32,
    pub completed_at: Timestamp,
}

/// Full assessment view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    pub id: String,
    pub status: AssessmentStatus,
    pub catalog_version: String,
    #[serde(flatten)]
    pub progress: AssessmentProgress,
    pub sections: BTreeMap<&'static str, SectionView>,
    pub total_time_spent_minutes: u32,
    pub started_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
}

impl From<&AssessmentSession> for AssessmentResponse {
    fn from(session: &AssessmentSession) -> Self {
        let sections = session
            .sections()
            .iter()
            .map(|(instrument, record)| {
                (
                    instrument.key(),
                    SectionView {
                        scores: record.scores.clone(),
                        interpretation: record.interpretation.clone(),
                        time_spent_minutes: record.time_spent_minutes,
                        completed_at: record.completed_at,
                    },
                )
            })
            .collect();

        Self {
            id: session.id().to_string(),
            status: session.status(),
            catalog_version: session.catalog_version().to_string(),
            progress: session.progress(),
            sections,
            total_time_spent_minutes: session.total_time_spent_minutes(),
            started_at: *session.started_at(),
            completed_at: session.completed_at().copied(),
        }
    }
}

/// Response for start/resume.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartAssessmentResponse {
    #[serde(flatten)]
    pub assessment: AssessmentResponse,
    pub resumed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superseded_assessment_id: Option<String>,
}

/// Response for a section submission: the completion projection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSectionResponse {
    pub assessment_id: String,
    pub status: AssessmentStatus,
    pub transition: SessionTransition,
    #[serde(flatten)]
    pub progress: AssessmentProgress,
}

/// Response for the latest-assessment query.
#[derive(Debug, Clone, Serialize)]
pub struct LatestAssessmentResponse {
    pub assessment: Option<AssessmentResponse>,
}

/// Response for the history query.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub items: Vec<AssessmentSummary>,
}

/// Personal insights options and limits offered to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInsightsCatalog {
    pub character_strengths: &'static [&'static str],
    pub values_in_life: &'static [&'static str],
    pub min_text_chars: usize,
    pub min_selections: usize,
}

/// The question sets clients render from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub version: &'static str,
    pub riasec: &'static [InterestQuestion],
    pub brain_profile: &'static [BrainStatementSet],
    pub brain_profile_quadrants: Vec<&'static str>,
    pub employability: &'static [StepsQuestion],
    pub personal_insights: PersonalInsightsCatalog,
}

impl CatalogResponse {
    pub fn current() -> Self {
        Self {
            version: catalog::CATALOG_VERSION,
            riasec: catalog::interest_questions(),
            brain_profile: catalog::brain_statement_sets(),
            brain_profile_quadrants: BrainQuadrant::all().iter().map(|q| q.label()).collect(),
            employability: catalog::steps_questions(),
            personal_insights: PersonalInsightsCatalog {
                character_strengths: catalog::CHARACTER_STRENGTH_OPTIONS,
                values_in_life: catalog::VALUES_IN_LIFE_OPTIONS,
                min_text_chars: MIN_INSIGHT_TEXT_CHARS,
                min_selections: MIN_INSIGHT_SELECTIONS,
            },
        }
    }
}

/// One violated rule of a rejected submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Every violated rule, for validation failures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn validation(report: &ValidationReport) -> Self {
        Self {
            error_code: "VALIDATION_FAILED".to_string(),
            message: format!("{} validation error(s)", report.errors().len()),
            errors: report
                .errors()
                .iter()
                .map(|e| FieldError {
                    field: e.field().to_string(),
                    message: e.to_string(),
                })
                .collect(),
        }
    }
}
