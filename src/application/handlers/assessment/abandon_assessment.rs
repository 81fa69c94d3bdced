//! AbandonAssessmentHandler - Command handler for abandoning an in-progress assessment.

use std::sync::Arc;

use crate::domain::assessment::{AssessmentError, AssessmentSession};
use crate::domain::foundation::{AssessmentId, UserId};
use crate::ports::AssessmentRepository;

/// Command to abandon an assessment.
#[derive(Debug, Clone)]
pub struct AbandonAssessmentCommand {
    pub user_id: UserId,
    pub assessment_id: AssessmentId,
}

pub struct AbandonAssessmentHandler {
    repository: Arc<dyn AssessmentRepository>,
}

impl AbandonAssessmentHandler {
    pub fn new(repository: Arc<dyn AssessmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: AbandonAssessmentCommand,
    ) -> Result<AssessmentSession, AssessmentError> {
        let owner = cmd.user_id.clone();
        let result = self
            .repository
            .update_atomically(
                &cmd.assessment_id,
                Box::new(move |session: &mut AssessmentSession| {
                    session.authorize(&owner)?;
                    session.abandon()
                }),
            )
            .await
            .map_err(|e| {
                if matches!(e, AssessmentError::InvalidState { .. }) {
                    tracing::warn!(assessment_id = %cmd.assessment_id, "Abandon rejected: {}", e);
                }
                e
            })?;

        tracing::info!(assessment_id = %cmd.assessment_id, "Assessment abandoned");
        Ok(result.session)
    }
}
