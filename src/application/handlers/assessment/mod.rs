//! Assessment command and query handlers.

mod abandon_assessment;
mod delete_assessment;
mod get_assessment;
mod get_latest_assessment;
mod list_assessment_history;
mod start_assessment;
mod submit_section;

pub use abandon_assessment::{AbandonAssessmentCommand, AbandonAssessmentHandler};
pub use delete_assessment::{DeleteAssessmentCommand, DeleteAssessmentHandler};
pub use get_assessment::{GetAssessmentHandler, GetAssessmentQuery};
pub use get_latest_assessment::{GetLatestAssessmentHandler, GetLatestAssessmentQuery};
pub use list_assessment_history::{
    ListAssessmentHistoryHandler, ListAssessmentHistoryQuery, MAX_HISTORY_LIMIT,
};
pub use start_assessment::{StartAssessmentCommand, StartAssessmentHandler, StartAssessmentResult};
pub use submit_section::{SubmitSectionCommand, SubmitSectionHandler, SubmitSectionResult};
