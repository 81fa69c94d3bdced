//! StartAssessmentHandler - Command handler for starting or resuming an assessment.

use std::sync::Arc;

use crate::domain::assessment::{AssessmentError, AssessmentSession};
use crate::domain::foundation::{AssessmentId, ErrorCode, UserId};
use crate::ports::AssessmentRepository;

/// Command to start (or resume) an assessment.
#[derive(Debug, Clone)]
pub struct StartAssessmentCommand {
    pub user_id: UserId,
    /// Abandon any in-progress session and open a fresh one.
    pub retake: bool,
}

/// Result of starting an assessment.
#[derive(Debug, Clone)]
pub struct StartAssessmentResult {
    pub session: AssessmentSession,
    /// True when an existing in-progress session was returned.
    pub resumed: bool,
    /// The in-progress session a retake abandoned, if any.
    pub superseded: Option<AssessmentId>,
}

/// Handler for starting assessments.
///
/// An owner has at most one in-progress session. Starting again resumes it;
/// a retake abandons it first. Completed sessions are never touched.
pub struct StartAssessmentHandler {
    repository: Arc<dyn AssessmentRepository>,
}

impl StartAssessmentHandler {
    pub fn new(repository: Arc<dyn AssessmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: StartAssessmentCommand,
    ) -> Result<StartAssessmentResult, AssessmentError> {
        let mut superseded = None;

        // 1. Resume or supersede the current attempt
        if let Some(existing) = self
            .repository
            .find_in_progress_by_owner(&cmd.user_id)
            .await?
        {
            if !cmd.retake {
                return Ok(StartAssessmentResult {
                    session: existing,
                    resumed: true,
                    superseded: None,
                });
            }

            let id = *existing.id();
            let owner = cmd.user_id.clone();
            match self
                .repository
                .update_atomically(
                    &id,
                    Box::new(move |session: &mut AssessmentSession| {
                        session.authorize(&owner)?;
                        session.abandon()
                    }),
                )
                .await
            {
                Ok(_) => superseded = Some(id),
                // Completed or abandoned by a racing request; nothing to supersede.
                Err(AssessmentError::InvalidState { .. }) => {}
                Err(e) => return Err(e),
            }
        }

        // 2. Open a new attempt
        let session = AssessmentSession::new(AssessmentId::new(), cmd.user_id.clone());
        match self.repository.save(&session).await {
            Ok(()) => {
                tracing::info!(
                    assessment_id = %session.id(),
                    user_id = %cmd.user_id,
                    retake = cmd.retake,
                    "Assessment started"
                );
                Ok(StartAssessmentResult {
                    session,
                    resumed: false,
                    superseded,
                })
            }
            Err(e) if e.code == ErrorCode::ConcurrentModification => {
                // A racing start won; hand back its session.
                tracing::warn!(user_id = %cmd.user_id, "Concurrent assessment start");
                let winner = self
                    .repository
                    .find_in_progress_by_owner(&cmd.user_id)
                    .await?
                    .ok_or_else(|| AssessmentError::from(e))?;
                Ok(StartAssessmentResult {
                    session: winner,
                    resumed: true,
                    superseded,
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}
