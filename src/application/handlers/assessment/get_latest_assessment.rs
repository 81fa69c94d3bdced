//! GetLatestAssessmentHandler - Query handler for the caller's current assessment.

use std::sync::Arc;

use crate::domain::assessment::{AssessmentError, AssessmentSession};
use crate::domain::foundation::UserId;
use crate::ports::AssessmentRepository;

/// Query for the caller's most recent non-abandoned assessment.
#[derive(Debug, Clone)]
pub struct GetLatestAssessmentQuery {
    pub user_id: UserId,
}

pub struct GetLatestAssessmentHandler {
    repository: Arc<dyn AssessmentRepository>,
}

impl GetLatestAssessmentHandler {
    pub fn new(repository: Arc<dyn AssessmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetLatestAssessmentQuery,
    ) -> Result<Option<AssessmentSession>, AssessmentError> {
        Ok(self.repository.find_latest_by_owner(&query.user_id).await?)
    }
}
