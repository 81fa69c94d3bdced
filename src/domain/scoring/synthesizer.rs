//! Composite Result Synthesizer.
//!
//! Pure function of the three quantitative score vectors. Rankings use the
//! stable ordering from [`RiasecScores::ranked`] and [`BrainScores::ranked`],
//! so ties always resolve the same way.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::aggregator::{round_to, BrainScores, RiasecScores, StepsScores};
use crate::domain::instrument::{BrainQuadrant, RiasecCategory, StepsCategory};

/// Letters in a Holland Code.
pub const HOLLAND_CODE_LENGTH: usize = 3;

/// Quadrants reported as dominant.
pub const DOMINANT_QUADRANT_COUNT: usize = 2;

/// Upper bound on career recommendations.
pub const MAX_CAREER_RECOMMENDATIONS: usize = 10;

/// STEPS averages below this are suggested for development.
pub const SKILL_GAP_THRESHOLD: f64 = 3.5;

/// Returned when no STEPS category falls below the threshold.
pub const NO_SKILL_GAPS: &str = "Continue developing all skill areas";

/// Qualitative band of the employability quotient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployabilityBand {
    Excellent,
    Good,
    Moderate,
    Developing,
}

impl EmployabilityBand {
    /// Bands: excellent >= 8, good >= 6, moderate >= 4, else developing.
    pub fn from_quotient(quotient: f64) -> Self {
        if quotient >= 8.0 {
            EmployabilityBand::Excellent
        } else if quotient >= 6.0 {
            EmployabilityBand::Good
        } else if quotient >= 4.0 {
            EmployabilityBand::Moderate
        } else {
            EmployabilityBand::Developing
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmployabilityBand::Excellent => "excellent",
            EmployabilityBand::Good => "good",
            EmployabilityBand::Moderate => "moderate",
            EmployabilityBand::Developing => "developing",
        }
    }
}

impl fmt::Display for EmployabilityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result computed once when every section of an assessment is complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeResult {
    pub holland_code: String,
    pub dominant_quadrants: Vec<BrainQuadrant>,
    pub employability_quotient: f64,
    pub employability_band: EmployabilityBand,
    pub narrative: String,
    pub career_recommendations: Vec<String>,
    pub learning_style_recommendations: Vec<String>,
    pub skill_development_areas: Vec<String>,
}

/// Combines the three quantitative score vectors.
pub fn synthesize(riasec: &RiasecScores, brain: &BrainScores, steps: &StepsScores) -> CompositeResult {
    let top_interests = top_interests(riasec);
    let dominant_quadrants = dominant_quadrants(brain);
    let employability_quotient = employability_quotient(steps);
    let employability_band = EmployabilityBand::from_quotient(employability_quotient);

    CompositeResult {
        holland_code: holland_code(riasec),
        narrative: narrative(
            &top_interests,
            &dominant_quadrants,
            employability_quotient,
            employability_band,
        ),
        career_recommendations: career_recommendations(&top_interests),
        learning_style_recommendations: learning_recommendations(&dominant_quadrants),
        skill_development_areas: skill_development_areas(steps),
        dominant_quadrants,
        employability_quotient,
        employability_band,
    }
}

/// Top three interest categories, best first.
pub fn top_interests(riasec: &RiasecScores) -> Vec<RiasecCategory> {
    riasec
        .ranked()
        .into_iter()
        .take(HOLLAND_CODE_LENGTH)
        .map(|(category, _)| category)
        .collect()
}

/// Holland Code from the top three interest categories.
pub fn holland_code(riasec: &RiasecScores) -> String {
    top_interests(riasec).iter().map(RiasecCategory::letter).collect()
}

/// Top two brain quadrants, best first.
pub fn dominant_quadrants(brain: &BrainScores) -> Vec<BrainQuadrant> {
    brain
        .ranked()
        .into_iter()
        .take(DOMINANT_QUADRANT_COUNT)
        .map(|(quadrant, _)| quadrant)
        .collect()
}

/// `(mean / 5) * 10`, rounded to one decimal.
pub fn employability_quotient(steps: &StepsScores) -> f64 {
    round_to(steps.mean() / 5.0 * 10.0, 1)
}

/// Careers of each category in order, deduplicated, at most ten.
pub fn career_recommendations(categories: &[RiasecCategory]) -> Vec<String> {
    let mut careers: Vec<String> = Vec::new();
    for career in categories.iter().flat_map(|c| c.careers()) {
        if careers.len() == MAX_CAREER_RECOMMENDATIONS {
            break;
        }
        if !careers.iter().any(|existing| existing == career) {
            careers.push((*career).to_string());
        }
    }
    careers
}

/// Learning tips of each quadrant, concatenated.
pub fn learning_recommendations(quadrants: &[BrainQuadrant]) -> Vec<String> {
    quadrants
        .iter()
        .flat_map(|q| q.learning_tips())
        .map(|tip| (*tip).to_string())
        .collect()
}

/// STEPS categories averaging below the threshold, or the sentinel entry.
pub fn skill_development_areas(steps: &StepsScores) -> Vec<String> {
    let areas: Vec<String> = StepsCategory::all()
        .iter()
        .filter(|c| steps.get(**c) < SKILL_GAP_THRESHOLD)
        .map(|c| c.development_area().to_string())
        .collect();
    if areas.is_empty() {
        vec![NO_SKILL_GAPS.to_string()]
    } else {
        areas
    }
}

fn narrative(
    interests: &[RiasecCategory],
    quadrants: &[BrainQuadrant],
    quotient: f64,
    band: EmployabilityBand,
) -> String {
    let mut parts = Vec::with_capacity(3);
    if let Some(top) = interests.first() {
        parts.push(format!(
            "Your strongest interest area is {}: {}.",
            top.display_name(),
            top.description()
        ));
    }
    if let Some(top) = quadrants.first() {
        parts.push(format!(
            "Your dominant thinking style is {} ({}): {}.",
            top.style_name(),
            top.label(),
            top.description()
        ));
    }
    parts.push(format!(
        "Your employability quotient is {:.1} out of 10, which is {}.",
        quotient, band
    ));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn riasec(r: u32, i: u32, a: u32, s: u32, e: u32, c: u32) -> RiasecScores {
        RiasecScores {
            realistic: r,
            investigative: i,
            artistic: a,
            social: s,
            enterprising: e,
            conventional: c,
        }
    }

    fn steps(values: [f64; 5]) -> StepsScores {
        StepsScores {
            self_management: values[0],
            teamwork: values[1],
            enterprising: values[2],
            problem_solving: values[3],
            speaking_listening: values[4],
        }
    }

    fn brain(values: [f64; 4]) -> BrainScores {
        BrainScores {
            l1: values[0],
            l2: values[1],
            r1: values[2],
            r2: values[3],
        }
    }

    #[test]
    fn holland_code_takes_top_three() {
        assert_eq!(holland_code(&riasec(5, 9, 3, 7, 2, 4)), "ISR");
    }

    #[test]
    fn holland_code_ties_follow_riasec_priority() {
        assert_eq!(holland_code(&riasec(3, 3, 3, 3, 3, 3)), "RIA");
        assert_eq!(holland_code(&riasec(0, 2, 5, 2, 5, 2)), "AEI");
    }

    #[test]
    fn composite_holland_code_matches_standalone_code() {
        let interests = riasec(0, 2, 5, 2, 5, 2);
        let result = synthesize(
            &interests,
            &brain([10.0, 25.0, 25.0, 25.0]),
            &steps([4.0, 3.2, 2.8, 4.4, 3.6]),
        );
        assert_eq!(result.holland_code, holland_code(&interests));
        assert_eq!(result.holland_code, "AEI");
    }

    #[test]
    fn dominant_quadrants_ties_follow_slot_priority() {
        assert_eq!(
            dominant_quadrants(&brain([10.0, 25.0, 25.0, 25.0])),
            vec![BrainQuadrant::L2, BrainQuadrant::R1]
        );
    }

    #[test]
    fn quotient_and_skill_areas_for_mixed_profile() {
        let scores = steps([4.0, 3.2, 2.8, 4.4, 3.6]);
        assert_eq!(employability_quotient(&scores), 7.2);
        assert_eq!(
            skill_development_areas(&scores),
            vec!["Teamwork and collaboration", "Enterprising and leadership"]
        );
    }

    #[test]
    fn no_gaps_returns_sentinel() {
        let scores = steps([3.5, 4.0, 5.0, 3.6, 4.2]);
        assert_eq!(skill_development_areas(&scores), vec![NO_SKILL_GAPS]);
    }

    #[test]
    fn bands_follow_thresholds() {
        assert_eq!(EmployabilityBand::from_quotient(8.0), EmployabilityBand::Excellent);
        assert_eq!(EmployabilityBand::from_quotient(7.9), EmployabilityBand::Good);
        assert_eq!(EmployabilityBand::from_quotient(4.0), EmployabilityBand::Moderate);
        assert_eq!(EmployabilityBand::from_quotient(3.9), EmployabilityBand::Developing);
    }

    #[test]
    fn careers_are_deduplicated_and_capped() {
        let careers = career_recommendations(&[
            RiasecCategory::Realistic,
            RiasecCategory::Investigative,
            RiasecCategory::Artistic,
        ]);
        assert_eq!(careers.len(), MAX_CAREER_RECOMMENDATIONS);
        assert_eq!(careers[0], "Mechanical Engineer");
        assert_eq!(
            careers.iter().filter(|c| c.as_str() == "Civil Engineer").count(),
            1
        );
    }

    #[test]
    fn learning_tips_concatenate_both_quadrants() {
        let tips = learning_recommendations(&[BrainQuadrant::R2, BrainQuadrant::L1]);
        assert_eq!(
            tips.len(),
            BrainQuadrant::R2.learning_tips().len() + BrainQuadrant::L1.learning_tips().len()
        );
        assert_eq!(tips[0], BrainQuadrant::R2.learning_tips()[0]);
    }

    #[test]
    fn synthesize_combines_all_parts() {
        let result = synthesize(
            &riasec(5, 9, 3, 7, 2, 4),
            &brain([12.0, 30.0, 18.0, 40.0]),
            &steps([4.0, 3.2, 2.8, 4.4, 3.6]),
        );

        assert_eq!(result.holland_code, "ISR");
        assert_eq!(
            result.dominant_quadrants,
            vec![BrainQuadrant::R2, BrainQuadrant::L2]
        );
        assert_eq!(result.employability_quotient, 7.2);
        assert_eq!(result.employability_band, EmployabilityBand::Good);
        assert!(result.narrative.contains("Investigative"));
        assert!(result.narrative.contains("Empathic"));
        assert!(result.narrative.contains("7.2 out of 10, which is good"));
        assert_eq!(result.career_recommendations[0], "Data Scientist");
    }

    #[test]
    fn composite_serializes_camel_case() {
        let result = synthesize(
            &riasec(1, 2, 3, 4, 5, 6),
            &brain([1.0, 2.0, 3.0, 4.0]),
            &steps([5.0; 5]),
        );
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["hollandCode"], "CES");
        assert_eq!(json["employabilityQuotient"], 10.0);
        assert_eq!(json["dominantQuadrants"][0], "R2");
    }

    proptest! {
        #[test]
        fn quotient_lies_between_zero_and_ten(values in prop::array::uniform5(1.0f64..=5.0)) {
            let quotient = employability_quotient(&steps(values));
            prop_assert!((0.0..=10.0).contains(&quotient));
        }

        #[test]
        fn synthesis_is_deterministic(
            counts in prop::array::uniform6(0u32..=9),
            totals in prop::array::uniform4(0.0f64..=40.0),
            averages in prop::array::uniform5(1.0f64..=5.0),
        ) {
            let interest = riasec(counts[0], counts[1], counts[2], counts[3], counts[4], counts[5]);
            let first = synthesize(&interest, &brain(totals), &steps(averages));
            let second = synthesize(&interest, &brain(totals), &steps(averages));
            prop_assert_eq!(first, second);
        }
    }
}
