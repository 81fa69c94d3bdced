//! Assessment history reader port (read side).
//!
//! Lists an owner's completed attempts for trend display. Only the headline
//! figures are returned; the full result is fetched by id.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AssessmentId, DomainError, Timestamp, UserId};

/// Reader port for completed-assessment history.
#[async_trait]
pub trait AssessmentHistoryReader: Send + Sync {
    /// Completed sessions of `owner_id`, newest first, at most `limit`.
    async fn list_completed(
        &self,
        owner_id: &UserId,
        limit: u32,
    ) -> Result<Vec<AssessmentSummary>, DomainError>;
}

/// Headline figures of one completed assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSummary {
    pub id: AssessmentId,
    pub completed_at: Timestamp,
    pub holland_code: String,
    pub employability_quotient: f64,
    pub total_time_spent_minutes: u32,
}
