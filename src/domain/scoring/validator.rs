//! Response Validator - checks a raw section submission against the catalog.
//!
//! Validation never stops at the first problem: every violated rule is
//! collected so the caller can present the complete list. A submission that
//! passes is parsed into typed [`SectionResponses`] in the same pass, which is
//! what the aggregator consumes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::responses::{
    BrainResponses, InterestResponses, PersonalInsights, SectionResponses, StepsResponses,
};
use crate::domain::foundation::ValidationError;
use crate::domain::instrument::catalog::{
    BRAIN_RATING_MAX, BRAIN_SET_COUNT, BRAIN_SLOTS, INTEREST_QUESTION_COUNT, LIKERT_MAX, LIKERT_MIN,
    MIN_INSIGHT_SELECTIONS, MIN_INSIGHT_TEXT_CHARS, STEPS_QUESTION_COUNT,
};
use crate::domain::instrument::InstrumentType;

/// How the four numbers of a brain profile set are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrainProfileScoring {
    /// Each number is an independent rating in `0..=BRAIN_RATING_MAX`.
    #[default]
    IndependentRatings,
    /// Each set must rank its statements 1-4, every rank used once.
    ForcedRank,
}

impl FromStr for BrainProfileScoring {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "independent_ratings" | "ratings" => Ok(BrainProfileScoring::IndependentRatings),
            "forced_rank" | "rank" => Ok(BrainProfileScoring::ForcedRank),
            other => Err(ValidationError::invalid_format(
                "brain_profile_scoring",
                format!("unknown scoring mode '{}'", other),
            )),
        }
    }
}

impl fmt::Display for BrainProfileScoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrainProfileScoring::IndependentRatings => write!(f, "independent_ratings"),
            BrainProfileScoring::ForcedRank => write!(f, "forced_rank"),
        }
    }
}

/// Outcome of validating one section: `{isValid, errors[]}`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Returns a report with no violations.
    pub fn valid() -> Self {
        Self::default()
    }

    /// Builds a report from collected violations.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns the human-readable message of every violation.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "valid");
        }
        write!(f, "{}", self.messages().join("; "))
    }
}

/// Validates and parses raw section responses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseValidator {
    brain_scoring: BrainProfileScoring,
}

impl ResponseValidator {
    pub fn new(brain_scoring: BrainProfileScoring) -> Self {
        Self { brain_scoring }
    }

    /// Returns the configured brain profile mode.
    pub fn brain_scoring(&self) -> BrainProfileScoring {
        self.brain_scoring
    }

    /// Pure check of `raw` against the shape contract of `instrument`.
    pub fn validate(&self, instrument: InstrumentType, raw: &Value) -> ValidationReport {
        match self.parse(instrument, raw) {
            Ok(_) => ValidationReport::valid(),
            Err(report) => report,
        }
    }

    /// Validates `raw` and converts it into typed responses.
    ///
    /// # Errors
    ///
    /// Returns a report listing every violated rule when the submission is
    /// not acceptable as a whole.
    pub fn parse(
        &self,
        instrument: InstrumentType,
        raw: &Value,
    ) -> Result<SectionResponses, ValidationReport> {
        let mut errors = Vec::new();
        let parsed = match instrument {
            InstrumentType::Riasec => parse_interest(raw, &mut errors).map(SectionResponses::Riasec),
            InstrumentType::BrainProfile => self
                .parse_brain(raw, &mut errors)
                .map(SectionResponses::BrainProfile),
            InstrumentType::Employability => {
                parse_steps(raw, &mut errors).map(SectionResponses::Employability)
            }
            InstrumentType::PersonalInsights => {
                parse_insights(raw, &mut errors).map(SectionResponses::PersonalInsights)
            }
        };

        match parsed {
            Some(responses) if errors.is_empty() => Ok(responses),
            _ => Err(ValidationReport::from_errors(errors)),
        }
    }

    fn parse_brain(&self, raw: &Value, errors: &mut Vec<ValidationError>) -> Option<BrainResponses> {
        let field = InstrumentType::BrainProfile.key();
        let entries = expect_array(raw, field, BRAIN_SET_COUNT, "an array of 4-number arrays", errors)?;

        let mut sets = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let set_field = format!("{}[{}]", field, index);
            let Some(numbers) = entry.as_array() else {
                errors.push(ValidationError::wrong_type(&set_field, "an array of 4 numbers"));
                continue;
            };
            if numbers.len() != BRAIN_SLOTS {
                errors.push(ValidationError::count_mismatch(
                    &set_field,
                    BRAIN_SLOTS,
                    numbers.len(),
                ));
            }

            let before = errors.len();
            let mut row = [0.0; BRAIN_SLOTS];
            for (slot, number) in numbers.iter().enumerate().take(BRAIN_SLOTS) {
                let slot_field = format!("{}[{}]", set_field, slot);
                match number.as_f64() {
                    Some(value) => {
                        if let Some(error) = self.check_brain_value(&slot_field, value) {
                            errors.push(error);
                        }
                        row[slot] = value;
                    }
                    None => errors.push(ValidationError::wrong_type(&slot_field, "a number")),
                }
            }

            if self.brain_scoring == BrainProfileScoring::ForcedRank
                && errors.len() == before
                && numbers.len() == BRAIN_SLOTS
                && !is_rank_permutation(&row)
            {
                errors.push(ValidationError::invalid_format(
                    &set_field,
                    "each rank from 1 to 4 must be used exactly once",
                ));
            }
            sets.push(row);
        }

        Some(BrainResponses(sets))
    }

    fn check_brain_value(&self, field: &str, value: f64) -> Option<ValidationError> {
        match self.brain_scoring {
            BrainProfileScoring::IndependentRatings => {
                if !value.is_finite() || value < 0.0 || value > BRAIN_RATING_MAX as f64 {
                    Some(ValidationError::out_of_range(
                        field,
                        0,
                        BRAIN_RATING_MAX,
                        value as i64,
                    ))
                } else {
                    None
                }
            }
            BrainProfileScoring::ForcedRank => {
                let rank = value as i64;
                if value.fract() != 0.0 || !(1..=BRAIN_SLOTS as i64).contains(&rank) {
                    Some(ValidationError::out_of_range(
                        field,
                        1,
                        BRAIN_SLOTS as i64,
                        rank,
                    ))
                } else {
                    None
                }
            }
        }
    }
}

fn is_rank_permutation(row: &[f64; BRAIN_SLOTS]) -> bool {
    let mut seen = [false; BRAIN_SLOTS];
    for value in row {
        let index = *value as usize;
        if index == 0 || index > BRAIN_SLOTS || seen[index - 1] {
            return false;
        }
        seen[index - 1] = true;
    }
    true
}

/// Checks that `raw` is an array of `expected` entries.
///
/// A count mismatch is recorded but the entries are still returned so their
/// individual values get checked too.
fn expect_array<'a>(
    raw: &'a Value,
    field: &str,
    expected: usize,
    description: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<&'a Vec<Value>> {
    let Some(entries) = raw.as_array() else {
        errors.push(ValidationError::wrong_type(field, description));
        return None;
    };
    if entries.len() != expected {
        errors.push(ValidationError::count_mismatch(field, expected, entries.len()));
    }
    Some(entries)
}

fn parse_interest(raw: &Value, errors: &mut Vec<ValidationError>) -> Option<InterestResponses> {
    let field = InstrumentType::Riasec.key();
    let entries = expect_array(raw, field, INTEREST_QUESTION_COUNT, "an array of booleans", errors)?;

    let mut answers = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match entry.as_bool() {
            Some(answer) => answers.push(answer),
            None => errors.push(ValidationError::wrong_type(
                format!("{}[{}]", field, index),
                "a boolean",
            )),
        }
    }
    Some(InterestResponses(answers))
}

fn parse_steps(raw: &Value, errors: &mut Vec<ValidationError>) -> Option<StepsResponses> {
    let field = InstrumentType::Employability.key();
    let entries = expect_array(raw, field, STEPS_QUESTION_COUNT, "an array of integers", errors)?;

    let mut answers = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let entry_field = format!("{}[{}]", field, index);
        match entry.as_i64() {
            Some(value) if (LIKERT_MIN..=LIKERT_MAX).contains(&value) => answers.push(value as u8),
            Some(value) => errors.push(ValidationError::out_of_range(
                entry_field,
                LIKERT_MIN,
                LIKERT_MAX,
                value,
            )),
            None => errors.push(ValidationError::wrong_type(entry_field, "an integer")),
        }
    }
    Some(StepsResponses(answers))
}

fn parse_insights(raw: &Value, errors: &mut Vec<ValidationError>) -> Option<PersonalInsights> {
    let field = InstrumentType::PersonalInsights.key();
    let Some(record) = raw.as_object() else {
        errors.push(ValidationError::wrong_type(field, "an object"));
        return None;
    };

    let what_you_like = text_field(record, field, "whatYouLike", errors);
    let what_you_are_good_at = text_field(record, field, "whatYouAreGoodAt", errors);
    let recent_projects = text_field(record, field, "recentProjects", errors);
    let character_strengths = list_field(record, field, "characterStrengths", errors);
    let values_in_life = list_field(record, field, "valuesInLife", errors);

    Some(PersonalInsights {
        what_you_like: what_you_like?,
        what_you_are_good_at: what_you_are_good_at?,
        recent_projects: recent_projects?,
        character_strengths: character_strengths?,
        values_in_life: values_in_life?,
    })
}

fn text_field(
    record: &Map<String, Value>,
    section: &str,
    key: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    let field = format!("{}.{}", section, key);
    let text = match record.get(key) {
        None | Some(Value::Null) => {
            errors.push(ValidationError::empty_field(field));
            return None;
        }
        Some(Value::String(text)) => text,
        Some(_) => {
            errors.push(ValidationError::wrong_type(field, "a string"));
            return None;
        }
    };

    let length = text.trim().chars().count();
    if length == 0 {
        errors.push(ValidationError::empty_field(field));
        None
    } else if length < MIN_INSIGHT_TEXT_CHARS {
        errors.push(ValidationError::too_short(field, MIN_INSIGHT_TEXT_CHARS, length));
        None
    } else {
        Some(text.clone())
    }
}

fn list_field(
    record: &Map<String, Value>,
    section: &str,
    key: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<Vec<String>> {
    let field = format!("{}.{}", section, key);
    let entries = match record.get(key) {
        None | Some(Value::Null) => {
            errors.push(ValidationError::empty_field(field));
            return None;
        }
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            errors.push(ValidationError::wrong_type(field, "an array of strings"));
            return None;
        }
    };

    let before = errors.len();
    let mut selections = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match entry.as_str() {
            Some(selection) if !selection.trim().is_empty() => {
                selections.push(selection.to_string())
            }
            _ => errors.push(ValidationError::wrong_type(
                format!("{}[{}]", field, index),
                "a non-empty string",
            )),
        }
    }
    if entries.len() < MIN_INSIGHT_SELECTIONS {
        errors.push(ValidationError::too_few(
            field,
            MIN_INSIGHT_SELECTIONS,
            entries.len(),
        ));
    }

    (errors.len() == before).then_some(selections)
}
