//! Client-facing projection of an assessment's completion state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Percentage;
use crate::domain::instrument::InstrumentType;
use crate::domain::scoring::CompositeResult;

/// Completion flag per section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionsCompleted {
    pub riasec: bool,
    pub brain_profile: bool,
    pub employability: bool,
    pub personal_insights: bool,
}

impl SectionsCompleted {
    pub fn get(&self, instrument: InstrumentType) -> bool {
        match instrument {
            InstrumentType::Riasec => self.riasec,
            InstrumentType::BrainProfile => self.brain_profile,
            InstrumentType::Employability => self.employability,
            InstrumentType::PersonalInsights => self.personal_insights,
        }
    }

    pub fn set(&mut self, instrument: InstrumentType) {
        match instrument {
            InstrumentType::Riasec => self.riasec = true,
            InstrumentType::BrainProfile => self.brain_profile = true,
            InstrumentType::Employability => self.employability = true,
            InstrumentType::PersonalInsights => self.personal_insights = true,
        }
    }

    pub fn count(&self) -> usize {
        InstrumentType::all().iter().filter(|i| self.get(**i)).count()
    }

    pub fn all(&self) -> bool {
        self.count() == InstrumentType::all().len()
    }

    /// First incomplete section in canonical order.
    pub fn next_section(&self) -> Option<InstrumentType> {
        InstrumentType::all().iter().copied().find(|i| !self.get(*i))
    }
}

/// `{sectionsCompleted, completionPercentage, nextSection?, compositeResult?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentProgress {
    pub sections_completed: SectionsCompleted,
    pub completion_percentage: Percentage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_section: Option<InstrumentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite_result: Option<CompositeResult>,
}

impl AssessmentProgress {
    pub fn new(sections_completed: SectionsCompleted, composite_result: Option<CompositeResult>) -> Self {
        Self {
            completion_percentage: Percentage::of(
                sections_completed.count(),
                InstrumentType::all().len(),
            ),
            next_section: sections_completed.next_section(),
            sections_completed,
            composite_result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_section_is_worth_25_percent() {
        let mut flags = SectionsCompleted::default();
        flags.set(InstrumentType::Employability);
        let progress = AssessmentProgress::new(flags, None);

        assert_eq!(progress.completion_percentage.value(), 25);
        assert_eq!(progress.next_section, Some(InstrumentType::Riasec));
    }

    #[test]
    fn next_section_follows_canonical_order() {
        let mut flags = SectionsCompleted::default();
        flags.set(InstrumentType::Riasec);
        flags.set(InstrumentType::BrainProfile);
        assert_eq!(flags.next_section(), Some(InstrumentType::Employability));

        flags.set(InstrumentType::Employability);
        flags.set(InstrumentType::PersonalInsights);
        assert_eq!(flags.next_section(), None);
        assert!(flags.all());
    }

    #[test]
    fn projection_serializes_camel_case_and_omits_absent_fields() {
        let mut flags = SectionsCompleted::default();
        for instrument in InstrumentType::all() {
            flags.set(*instrument);
        }
        let json = serde_json::to_value(AssessmentProgress::new(flags, None)).unwrap();

        assert_eq!(json["sectionsCompleted"]["brainProfile"], true);
        assert_eq!(json["completionPercentage"], 100);
        assert!(json.get("nextSection").is_none());
        assert!(json.get("compositeResult").is_none());
    }
}
