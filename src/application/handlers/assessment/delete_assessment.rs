//! DeleteAssessmentHandler - Command handler for deleting an assessment.

use std::sync::Arc;

use crate::domain::assessment::AssessmentError;
use crate::domain::foundation::{AssessmentId, ErrorCode, UserId};
use crate::ports::AssessmentRepository;

/// Command to delete an assessment and its stored responses.
#[derive(Debug, Clone)]
pub struct DeleteAssessmentCommand {
    pub user_id: UserId,
    pub assessment_id: AssessmentId,
}

pub struct DeleteAssessmentHandler {
    repository: Arc<dyn AssessmentRepository>,
}

impl DeleteAssessmentHandler {
    pub fn new(repository: Arc<dyn AssessmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteAssessmentCommand) -> Result<(), AssessmentError> {
        let session = self
            .repository
            .find_by_id(&cmd.assessment_id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(cmd.assessment_id))?;
        session.authorize(&cmd.user_id)?;

        self.repository
            .delete(&cmd.assessment_id)
            .await
            .map_err(|e| match e.code {
                ErrorCode::AssessmentNotFound => AssessmentError::not_found(cmd.assessment_id),
                _ => AssessmentError::from(e),
            })?;

        tracing::info!(assessment_id = %cmd.assessment_id, "Assessment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAssessmentRepository;
    use crate::application::handlers::assessment::test_support::{start_session, user};

    #[tokio::test]
    async fn owner_can_delete() {
        let repo = InMemoryAssessmentRepository::new();
        let id = start_session(&repo, "user-1").await;

        DeleteAssessmentHandler::new(Arc::new(repo.clone()))
            .handle(DeleteAssessmentCommand {
                user_id: user("user-1"),
                assessment_id: id,
            })
            .await
            .unwrap();

        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn other_user_cannot_delete() {
        let repo = InMemoryAssessmentRepository::new();
        let id = start_session(&repo, "user-1").await;

        let err = DeleteAssessmentHandler::new(Arc::new(repo.clone()))
            .handle(DeleteAssessmentCommand {
                user_id: user("user-2"),
                assessment_id: id,
            })
            .await
            .unwrap_err();

        assert_eq!(err, AssessmentError::Forbidden);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn missing_assessment_is_not_found() {
        let id = AssessmentId::new();
        let err = DeleteAssessmentHandler::new(Arc::new(InMemoryAssessmentRepository::new()))
            .handle(DeleteAssessmentCommand {
                user_id: user("user-1"),
                assessment_id: id,
            })
            .await
            .unwrap_err();

        assert_eq!(err, AssessmentError::NotFound(id));
    }
}
