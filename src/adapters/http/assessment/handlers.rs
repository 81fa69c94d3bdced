//! HTTP handlers for assessment endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::assessment::{
    AbandonAssessmentCommand, AbandonAssessmentHandler, DeleteAssessmentCommand,
    DeleteAssessmentHandler, GetAssessmentHandler, GetAssessmentQuery,
    GetLatestAssessmentHandler, GetLatestAssessmentQuery, ListAssessmentHistoryHandler,
    ListAssessmentHistoryQuery, StartAssessmentCommand, StartAssessmentHandler,
    SubmitSectionCommand, SubmitSectionHandler,
};
use crate::domain::assessment::AssessmentError;
use crate::domain::foundation::{AssessmentId, ErrorCode};
use crate::domain::instrument::InstrumentType;
use crate::domain::scoring::ResponseValidator;
use crate::ports::{AssessmentHistoryReader, AssessmentRepository};

use super::dto::{
    AssessmentResponse, CatalogResponse, ErrorResponse, HistoryParams, HistoryResponse,
    LatestAssessmentResponse, StartAssessmentRequest, StartAssessmentResponse,
    SubmitSectionRequest, SubmitSectionResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct AssessmentAppState {
    pub repository: Arc<dyn AssessmentRepository>,
    pub history_reader: Arc<dyn AssessmentHistoryReader>,
    pub validator: ResponseValidator,
    pub history_limit: u32,
}

impl AssessmentAppState {
    pub fn start_handler(&self) -> StartAssessmentHandler {
        StartAssessmentHandler::new(self.repository.clone())
    }

    pub fn submit_handler(&self) -> SubmitSectionHandler {
        SubmitSectionHandler::new(self.repository.clone(), self.validator)
    }

    pub fn get_handler(&self) -> GetAssessmentHandler {
        GetAssessmentHandler::new(self.repository.clone())
    }

    pub fn latest_handler(&self) -> GetLatestAssessmentHandler {
        GetLatestAssessmentHandler::new(self.repository.clone())
    }

    pub fn history_handler(&self) -> ListAssessmentHistoryHandler {
        ListAssessmentHistoryHandler::new(self.history_reader.clone(), self.history_limit)
    }

    pub fn abandon_handler(&self) -> AbandonAssessmentHandler {
        AbandonAssessmentHandler::new(self.repository.clone())
    }

    pub fn delete_handler(&self) -> DeleteAssessmentHandler {
        DeleteAssessmentHandler::new(self.repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/assessments/catalog - Question sets for all four instruments
pub async fn get_catalog() -> impl IntoResponse {
    Json(CatalogResponse::current())
}

/// GET /api/assessments/latest - Caller's most recent non-abandoned assessment
pub async fn get_latest_assessment(
    State(state): State<AssessmentAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, AssessmentApiError> {
    let latest = state
        .latest_handler()
        .handle(GetLatestAssessmentQuery { user_id: user.id })
        .await?;

    Ok(Json(LatestAssessmentResponse {
        assessment: latest.as_ref().map(AssessmentResponse::from),
    }))
}

/// GET /api/assessments/history - Caller's completed assessments, newest first
pub async fn list_history(
    State(state): State<AssessmentAppState>,
    RequireAuth(user): RequireAuth,
    Query(params): Query<HistoryParams>,
) -> Result<impl IntoResponse, AssessmentApiError> {
    let items = state
        .history_handler()
        .handle(ListAssessmentHistoryQuery {
            user_id: user.id,
            limit: params.limit,
        })
        .await?;

    Ok(Json(HistoryResponse { items }))
}

/// GET /api/assessments/:id - One assessment
pub async fn get_assessment(
    State(state): State<AssessmentAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AssessmentApiError> {
    let session = state
        .get_handler()
        .handle(GetAssessmentQuery {
            user_id: user.id,
            assessment_id: parse_id(&id)?,
        })
        .await?;

    Ok(Json(AssessmentResponse::from(&session)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/DELETE endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/assessments - Start a new assessment or resume the current one
pub async fn start_assessment(
    State(state): State<AssessmentAppState>,
    RequireAuth(user): RequireAuth,
    request: Option<Json<StartAssessmentRequest>>,
) -> Result<impl IntoResponse, AssessmentApiError> {
    let retake = request.map(|Json(body)| body.retake).unwrap_or(false);
    let result = state
        .start_handler()
        .handle(StartAssessmentCommand {
            user_id: user.id,
            retake,
        })
        .await?;

    let status = if result.resumed {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    let body = StartAssessmentResponse {
        assessment: AssessmentResponse::from(&result.session),
        resumed: result.resumed,
        superseded_assessment_id: result.superseded.map(|id| id.to_string()),
    };

    Ok((status, Json(body)))
}

/// POST /api/assessments/:id/sections/:section - Submit one section
pub async fn submit_section(
    State(state): State<AssessmentAppState>,
    RequireAuth(user): RequireAuth,
    Path((id, section)): Path<(String, String)>,
    Json(request): Json<SubmitSectionRequest>,
) -> Result<impl IntoResponse, AssessmentApiError> {
    let assessment_id = parse_id(&id)?;
    let section: InstrumentType = section
        .parse()
        .map_err(|_| AssessmentApiError::BadRequest(format!("Unknown section: {}", section)))?;

    let result = state
        .submit_handler()
        .handle(SubmitSectionCommand {
            user_id: user.id,
            assessment_id,
            section,
            raw_responses: request.raw_responses,
            time_spent_minutes: request.time_spent_minutes,
        })
        .await?;

    Ok(Json(SubmitSectionResponse {
        assessment_id: assessment_id.to_string(),
        status: result.session.status(),
        transition: result.transition,
        progress: result.progress(),
    }))
}

/// POST /api/assessments/:id/abandon - Abandon an in-progress assessment
pub async fn abandon_assessment(
    State(state): State<AssessmentAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AssessmentApiError> {
    let session = state
        .abandon_handler()
        .handle(AbandonAssessmentCommand {
            user_id: user.id,
            assessment_id: parse_id(&id)?,
        })
        .await?;

    Ok(Json(AssessmentResponse::from(&session)))
}

/// DELETE /api/assessments/:id - Delete an assessment
pub async fn delete_assessment(
    State(state): State<AssessmentAppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AssessmentApiError> {
    state
        .delete_handler()
        .handle(DeleteAssessmentCommand {
            user_id: user.id,
            assessment_id: parse_id(&id)?,
        })
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> Result<AssessmentId, AssessmentApiError> {
    raw.parse()
        .map_err(|_| AssessmentApiError::BadRequest(format!("Invalid assessment id: {}", raw)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub enum AssessmentApiError {
    Domain(AssessmentError),
    BadRequest(String),
}

impl From<AssessmentError> for AssessmentApiError {
    fn from(err: AssessmentError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for AssessmentApiError {
    fn into_response(self) -> Response {
        let err = match self {
            AssessmentApiError::BadRequest(message) => {
                let body = ErrorResponse::new("BAD_REQUEST", message);
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
            AssessmentApiError::Domain(err) => err,
        };

        let (status, body) = match &err {
            AssessmentError::Validation(report) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorResponse::validation(report))
            }
            AssessmentError::InvalidState { code, message } => (
                StatusCode::CONFLICT,
                ErrorResponse::new(error_code(*code), message.clone()),
            ),
            AssessmentError::Consistency(message) => (
                StatusCode::CONFLICT,
                ErrorResponse::new("CONCURRENT_MODIFICATION", message.clone()),
            ),
            AssessmentError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("ASSESSMENT_NOT_FOUND", err.to_string()),
            ),
            AssessmentError::Forbidden => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new("FORBIDDEN", err.to_string()),
            ),
            AssessmentError::Infrastructure(message) => {
                tracing::error!("Assessment request failed: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("INTERNAL_ERROR", "Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

fn error_code(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::AssessmentCompleted => "ASSESSMENT_COMPLETED",
        ErrorCode::AssessmentAbandoned => "ASSESSMENT_ABANDONED",
        ErrorCode::SectionMissing => "SECTION_MISSING",
        _ => "INVALID_STATE_TRANSITION",
    }
}
