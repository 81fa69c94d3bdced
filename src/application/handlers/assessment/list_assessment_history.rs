//! ListAssessmentHistoryHandler - Query handler for completed assessments.

use std::sync::Arc;

use crate::domain::assessment::AssessmentError;
use crate::domain::foundation::UserId;
use crate::ports::{AssessmentHistoryReader, AssessmentSummary};

/// Upper bound on one history page.
pub const MAX_HISTORY_LIMIT: u32 = 100;

/// Query for the caller's completed assessments, newest first.
#[derive(Debug, Clone)]
pub struct ListAssessmentHistoryQuery {
    pub user_id: UserId,
    pub limit: Option<u32>,
}

pub struct ListAssessmentHistoryHandler {
    reader: Arc<dyn AssessmentHistoryReader>,
    default_limit: u32,
}

impl ListAssessmentHistoryHandler {
    pub fn new(reader: Arc<dyn AssessmentHistoryReader>, default_limit: u32) -> Self {
        Self {
            reader,
            default_limit,
        }
    }

    pub async fn handle(
        &self,
        query: ListAssessmentHistoryQuery,
    ) -> Result<Vec<AssessmentSummary>, AssessmentError> {
        let limit = query
            .limit
            .unwrap_or(self.default_limit)
            .clamp(1, MAX_HISTORY_LIMIT);
        Ok(self.reader.list_completed(&query.user_id, limit).await?)
    }
}
