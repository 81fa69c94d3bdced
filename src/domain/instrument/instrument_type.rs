//! InstrumentType enum - the four independently submitted sections.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The four psychometric instruments that make up an assessment.
///
/// Declaration order is the canonical section order used for
/// "next section" suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InstrumentType {
    Riasec,
    BrainProfile,
    Employability,
    PersonalInsights,
}

impl InstrumentType {
    /// Returns all instruments in canonical order.
    pub fn all() -> &'static [InstrumentType] {
        &[
            InstrumentType::Riasec,
            InstrumentType::BrainProfile,
            InstrumentType::Employability,
            InstrumentType::PersonalInsights,
        ]
    }

    /// Wire key, as used in `sectionsCompleted` and route segments.
    pub fn key(&self) -> &'static str {
        match self {
            InstrumentType::Riasec => "riasec",
            InstrumentType::BrainProfile => "brainProfile",
            InstrumentType::Employability => "employability",
            InstrumentType::PersonalInsights => "personalInsights",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            InstrumentType::Riasec => "Interest Inventory",
            InstrumentType::BrainProfile => "Brain Profile",
            InstrumentType::Employability => "Employability (STEPS)",
            InstrumentType::PersonalInsights => "Personal Insights",
        }
    }

    /// True for the three sections that produce a numeric score vector.
    pub fn is_quantitative(&self) -> bool {
        !matches!(self, InstrumentType::PersonalInsights)
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for InstrumentType {
    type Err = ValidationError;

    /// Accepts the camelCase wire key as well as kebab/snake spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "riasec" | "interest" | "interestinventory" => Ok(InstrumentType::Riasec),
            "brainprofile" => Ok(InstrumentType::BrainProfile),
            "employability" | "steps" => Ok(InstrumentType::Employability),
            "personalinsights" => Ok(InstrumentType::PersonalInsights),
            _ => Err(ValidationError::invalid_format(
                "section",
                format!("unknown section '{}'", s),
            )),
        }
    }
}
