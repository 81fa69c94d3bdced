//! Stored result of one submitted section.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::Timestamp;
use crate::domain::instrument::InstrumentType;
use crate::domain::scoring::{SectionInterpretation, SectionScores};

/// One section's result.
///
/// `raw_responses` is the verbatim audit copy of what the client sent;
/// `scores` and `interpretation` are always derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRecord {
    pub raw_responses: Value,
    pub scores: SectionScores,
    pub time_spent_minutes: u32,
    pub completed_at: Timestamp,
    pub interpretation: SectionInterpretation,
}

impl SectionRecord {
    pub fn instrument(&self) -> InstrumentType {
        self.scores.instrument()
    }
}
