//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod assessment;

pub use assessment::{
    AbandonAssessmentCommand, AbandonAssessmentHandler, DeleteAssessmentCommand,
    DeleteAssessmentHandler, GetAssessmentHandler, GetAssessmentQuery,
    GetLatestAssessmentHandler, GetLatestAssessmentQuery, ListAssessmentHistoryHandler,
    ListAssessmentHistoryQuery, StartAssessmentCommand, StartAssessmentHandler,
    StartAssessmentResult, SubmitSectionCommand, SubmitSectionHandler, SubmitSectionResult,
};
