//! SubmitSectionHandler - Command handler for submitting one assessment section.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::assessment::{
    AssessmentError, AssessmentProgress, AssessmentSession, SessionTransition,
};
use crate::domain::foundation::{AssessmentId, UserId};
use crate::domain::instrument::InstrumentType;
use crate::domain::scoring::ResponseValidator;
use crate::ports::AssessmentRepository;

/// Command to submit the raw responses of one section.
#[derive(Debug, Clone)]
pub struct SubmitSectionCommand {
    pub user_id: UserId,
    pub assessment_id: AssessmentId,
    pub section: InstrumentType,
    pub raw_responses: Value,
    pub time_spent_minutes: u32,
}

/// Result of a section submission.
#[derive(Debug, Clone)]
pub struct SubmitSectionResult {
    pub session: AssessmentSession,
    pub transition: SessionTransition,
}

impl SubmitSectionResult {
    pub fn progress(&self) -> AssessmentProgress {
        self.session.progress()
    }
}

/// Handler for section submissions.
///
/// Ownership check, validation, scoring, and (on the fourth section)
/// synthesis all run inside one atomic repository update.
pub struct SubmitSectionHandler {
    repository: Arc<dyn AssessmentRepository>,
    validator: ResponseValidator,
}

impl SubmitSectionHandler {
    pub fn new(repository: Arc<dyn AssessmentRepository>, validator: ResponseValidator) -> Self {
        Self {
            repository,
            validator,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitSectionCommand,
    ) -> Result<SubmitSectionResult, AssessmentError> {
        let validator = self.validator;
        let owner = cmd.user_id.clone();
        let section = cmd.section;
        let raw_responses = cmd.raw_responses;
        let minutes = cmd.time_spent_minutes;

        let outcome = self
            .repository
            .update_atomically(
                &cmd.assessment_id,
                Box::new(move |session: &mut AssessmentSession| {
                    session.authorize(&owner)?;
                    session.submit_section(&validator, section, raw_responses, minutes)
                }),
            )
            .await;

        match outcome {
            Ok(result) => {
                match result.transition {
                    SessionTransition::Completed { .. } => {
                        tracing::info!(
                            assessment_id = %cmd.assessment_id,
                            section = section.key(),
                            holland_code = result
                                .session
                                .composite_result()
                                .map(|c| c.holland_code.as_str())
                                .unwrap_or_default(),
                            "Assessment completed"
                        );
                    }
                    SessionTransition::AlreadyCompleted => {
                        tracing::debug!(
                            assessment_id = %cmd.assessment_id,
                            section = section.key(),
                            "Replayed submission on completed assessment"
                        );
                    }
                    _ => {
                        tracing::info!(
                            assessment_id = %cmd.assessment_id,
                            section = section.key(),
                            "Section submitted"
                        );
                    }
                }
                Ok(SubmitSectionResult {
                    session: result.session,
                    transition: result.transition,
                })
            }
            Err(AssessmentError::Validation(report)) => {
                tracing::debug!(
                    assessment_id = %cmd.assessment_id,
                    section = section.key(),
                    errors = report.errors().len(),
                    "Section rejected: {}",
                    report
                );
                Err(AssessmentError::Validation(report))
            }
            Err(e @ (AssessmentError::InvalidState { .. } | AssessmentError::Consistency(_))) => {
                tracing::warn!(
                    assessment_id = %cmd.assessment_id,
                    section = section.key(),
                    "Section submission conflict: {}",
                    e
                );
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}
