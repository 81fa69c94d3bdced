//! GetAssessmentHandler - Query handler for one assessment.

use std::sync::Arc;

use crate::domain::assessment::{AssessmentError, AssessmentSession};
use crate::domain::foundation::{AssessmentId, UserId};
use crate::ports::AssessmentRepository;

/// Query for one assessment by id.
#[derive(Debug, Clone)]
pub struct GetAssessmentQuery {
    pub user_id: UserId,
    pub assessment_id: AssessmentId,
}

/// Handler for retrieving an assessment owned by the caller.
pub struct GetAssessmentHandler {
    repository: Arc<dyn AssessmentRepository>,
}

impl GetAssessmentHandler {
    pub fn new(repository: Arc<dyn AssessmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetAssessmentQuery) -> Result<AssessmentSession, AssessmentError> {
        let session = self
            .repository
            .find_by_id(&query.assessment_id)
            .await?
            .ok_or_else(|| AssessmentError::not_found(query.assessment_id))?;

        session.authorize(&query.user_id)?;
        Ok(session)
    }
}
