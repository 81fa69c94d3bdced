//! Score Aggregator - pure mapping from validated responses to score vectors.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::responses::{
    BrainResponses, InterestResponses, PersonalInsights, SectionResponses, StepsResponses,
};
use crate::domain::instrument::catalog::{interest_positions_for, steps_positions_for};
use crate::domain::instrument::{BrainQuadrant, InstrumentType, RiasecCategory, StepsCategory};

/// Count of `true` answers per Holland category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RiasecScores {
    #[serde(rename = "R")]
    pub realistic: u32,
    #[serde(rename = "I")]
    pub investigative: u32,
    #[serde(rename = "A")]
    pub artistic: u32,
    #[serde(rename = "S")]
    pub social: u32,
    #[serde(rename = "E")]
    pub enterprising: u32,
    #[serde(rename = "C")]
    pub conventional: u32,
}

impl RiasecScores {
    pub fn get(&self, category: RiasecCategory) -> u32 {
        match category {
            RiasecCategory::Realistic => self.realistic,
            RiasecCategory::Investigative => self.investigative,
            RiasecCategory::Artistic => self.artistic,
            RiasecCategory::Social => self.social,
            RiasecCategory::Enterprising => self.enterprising,
            RiasecCategory::Conventional => self.conventional,
        }
    }

    fn slot(&mut self, category: RiasecCategory) -> &mut u32 {
        match category {
            RiasecCategory::Realistic => &mut self.realistic,
            RiasecCategory::Investigative => &mut self.investigative,
            RiasecCategory::Artistic => &mut self.artistic,
            RiasecCategory::Social => &mut self.social,
            RiasecCategory::Enterprising => &mut self.enterprising,
            RiasecCategory::Conventional => &mut self.conventional,
        }
    }

    /// Sum of all category counts.
    pub fn total(&self) -> u32 {
        RiasecCategory::all().iter().map(|c| self.get(*c)).sum()
    }

    /// Categories by score descending, ties in `R > I > A > S > E > C` order.
    pub fn ranked(&self) -> Vec<(RiasecCategory, u32)> {
        let mut ranked: Vec<_> = RiasecCategory::all()
            .iter()
            .map(|c| (*c, self.get(*c)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Positional sums of brain profile numbers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BrainScores {
    #[serde(rename = "L1")]
    pub l1: f64,
    #[serde(rename = "L2")]
    pub l2: f64,
    #[serde(rename = "R1")]
    pub r1: f64,
    #[serde(rename = "R2")]
    pub r2: f64,
}

impl BrainScores {
    pub fn get(&self, quadrant: BrainQuadrant) -> f64 {
        match quadrant {
            BrainQuadrant::L1 => self.l1,
            BrainQuadrant::L2 => self.l2,
            BrainQuadrant::R1 => self.r1,
            BrainQuadrant::R2 => self.r2,
        }
    }

    /// Quadrants by total descending, ties in `L1 > L2 > R1 > R2` order.
    pub fn ranked(&self) -> Vec<(BrainQuadrant, f64)> {
        let mut ranked: Vec<_> = BrainQuadrant::all()
            .iter()
            .map(|q| (*q, self.get(*q)))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked
    }
}

/// STEPS category averages, each rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepsScores {
    pub self_management: f64,
    pub teamwork: f64,
    pub enterprising: f64,
    pub problem_solving: f64,
    pub speaking_listening: f64,
}

impl StepsScores {
    pub fn get(&self, category: StepsCategory) -> f64 {
        match category {
            StepsCategory::SelfManagement => self.self_management,
            StepsCategory::Teamwork => self.teamwork,
            StepsCategory::Enterprising => self.enterprising,
            StepsCategory::ProblemSolving => self.problem_solving,
            StepsCategory::SpeakingListening => self.speaking_listening,
        }
    }

    fn slot(&mut self, category: StepsCategory) -> &mut f64 {
        match category {
            StepsCategory::SelfManagement => &mut self.self_management,
            StepsCategory::Teamwork => &mut self.teamwork,
            StepsCategory::Enterprising => &mut self.enterprising,
            StepsCategory::ProblemSolving => &mut self.problem_solving,
            StepsCategory::SpeakingListening => &mut self.speaking_listening,
        }
    }

    /// Mean of the five category averages.
    pub fn mean(&self) -> f64 {
        let all = StepsCategory::all();
        all.iter().map(|c| self.get(*c)).sum::<f64>() / all.len() as f64
    }
}

/// Score vector of one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "instrument", content = "scores", rename_all = "camelCase")]
pub enum SectionScores {
    Riasec(RiasecScores),
    BrainProfile(BrainScores),
    Employability(StepsScores),
    /// The validated record itself; this section has no numeric score.
    PersonalInsights(PersonalInsights),
}

impl SectionScores {
    pub fn instrument(&self) -> InstrumentType {
        match self {
            SectionScores::Riasec(_) => InstrumentType::Riasec,
            SectionScores::BrainProfile(_) => InstrumentType::BrainProfile,
            SectionScores::Employability(_) => InstrumentType::Employability,
            SectionScores::PersonalInsights(_) => InstrumentType::PersonalInsights,
        }
    }
}

/// Scores one validated section.
pub fn score(responses: &SectionResponses) -> SectionScores {
    match responses {
        SectionResponses::Riasec(answers) => SectionScores::Riasec(score_interest(answers)),
        SectionResponses::BrainProfile(sets) => SectionScores::BrainProfile(score_brain(sets)),
        SectionResponses::Employability(answers) => {
            SectionScores::Employability(score_steps(answers))
        }
        SectionResponses::PersonalInsights(record) => {
            SectionScores::PersonalInsights(record.clone())
        }
    }
}

pub fn score_interest(responses: &InterestResponses) -> RiasecScores {
    let answers = responses.answers();
    let mut scores = RiasecScores::default();
    for category in RiasecCategory::all() {
        *scores.slot(*category) = interest_positions_for(*category)
            .iter()
            .filter(|position| answers.get(**position).copied().unwrap_or(false))
            .count() as u32;
    }
    scores
}

pub fn score_brain(responses: &BrainResponses) -> BrainScores {
    let mut totals = [0.0; 4];
    for set in responses.sets() {
        for (total, value) in totals.iter_mut().zip(set.iter()) {
            *total += value;
        }
    }
    BrainScores {
        l1: totals[BrainQuadrant::L1.slot()],
        l2: totals[BrainQuadrant::L2.slot()],
        r1: totals[BrainQuadrant::R1.slot()],
        r2: totals[BrainQuadrant::R2.slot()],
    }
}

pub fn score_steps(responses: &StepsResponses) -> StepsScores {
    let answers = responses.answers();
    let mut scores = StepsScores::default();
    for category in StepsCategory::all() {
        let block: Vec<f64> = steps_positions_for(*category)
            .filter_map(|position| answers.get(position))
            .map(|answer| f64::from(*answer))
            .collect();
        let average = if block.is_empty() {
            0.0
        } else {
            block.iter().sum::<f64>() / block.len() as f64
        };
        *scores.slot(*category) = round_to(average, 2);
    }
    scores
}

/// Rounds half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
