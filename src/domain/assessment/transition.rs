//! Outcome of one mutation applied to an assessment.

use serde::Serialize;

use crate::domain::instrument::InstrumentType;

/// What a mutation did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionTransition {
    /// Section stored; the session is still in progress.
    SectionRecorded { section: InstrumentType },
    /// Final section stored and the composite result synthesized.
    Completed { section: InstrumentType },
    /// Replay against a completed session; nothing was written.
    AlreadyCompleted,
    /// Session moved to `abandoned`.
    Abandoned,
}

impl SessionTransition {
    /// Returns true when the mutation changed the session and must be persisted.
    pub fn is_write(&self) -> bool {
        !matches!(self, SessionTransition::AlreadyCompleted)
    }

    pub fn completed_now(&self) -> bool {
        matches!(self, SessionTransition::Completed { .. })
    }
}
