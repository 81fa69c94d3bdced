//! Typed section responses, produced only by the validator.

use serde::{Deserialize, Serialize};

use crate::domain::instrument::catalog::BRAIN_SLOTS;
use crate::domain::instrument::InstrumentType;

/// Interest inventory answers in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct InterestResponses(pub(crate) Vec<bool>);

impl InterestResponses {
    pub fn answers(&self) -> &[bool] {
        &self.0
    }
}

/// Brain profile numbers, one `[L1, L2, R1, R2]` row per set.
#[derive(Debug, Clone, PartialEq)]
pub struct BrainResponses(pub(crate) Vec<[f64; BRAIN_SLOTS]>);

impl BrainResponses {
    pub fn sets(&self) -> &[[f64; BRAIN_SLOTS]] {
        &self.0
    }
}

/// STEPS Likert answers in catalog order, each in `1..=5`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepsResponses(pub(crate) Vec<u8>);

impl StepsResponses {
    pub fn answers(&self) -> &[u8] {
        &self.0
    }
}

/// Personal insights record. Passed through unchanged as the section's "score".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInsights {
    pub what_you_like: String,
    pub what_you_are_good_at: String,
    pub recent_projects: String,
    pub character_strengths: Vec<String>,
    pub values_in_life: Vec<String>,
}

/// Validated responses for exactly one section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionResponses {
    Riasec(InterestResponses),
    BrainProfile(BrainResponses),
    Employability(StepsResponses),
    PersonalInsights(PersonalInsights),
}

impl SectionResponses {
    pub fn instrument(&self) -> InstrumentType {
        match self {
            SectionResponses::Riasec(_) => InstrumentType::Riasec,
            SectionResponses::BrainProfile(_) => InstrumentType::BrainProfile,
            SectionResponses::Employability(_) => InstrumentType::Employability,
            SectionResponses::PersonalInsights(_) => InstrumentType::PersonalInsights,
        }
    }
}
