//! AssessmentStatus enum tracking the lifecycle of one assessment attempt.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of an assessment attempt.
///
/// `InProgress` is the only mutable state. `Completed` is reached only by the
/// fourth section submission; `Abandoned` only by an explicit external call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    #[default]
    InProgress,
    Completed,
    Abandoned,
}

impl AssessmentStatus {
    /// Returns true if sections can still be submitted.
    pub fn is_mutable(&self) -> bool {
        matches!(self, AssessmentStatus::InProgress)
    }

    /// Storage representation, matching the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentStatus::InProgress => "in_progress",
            AssessmentStatus::Completed => "completed",
            AssessmentStatus::Abandoned => "abandoned",
        }
    }
}

impl StateMachine for AssessmentStatus {
    fn successors(&self) -> &'static [Self] {
        match self {
            AssessmentStatus::InProgress => &[AssessmentStatus::Completed, AssessmentStatus::Abandoned],
            AssessmentStatus::Completed | AssessmentStatus::Abandoned => &[],
        }
    }
}

impl fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssessmentStatus::InProgress => "In Progress",
            AssessmentStatus::Completed => "Completed",
            AssessmentStatus::Abandoned => "Abandoned",
        };
        write!(f, "{}", s)
    }
}
