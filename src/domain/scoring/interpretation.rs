//! Per-section interpretation text and recommendations.
//!
//! Regenerated from the section's score vector whenever the section is scored.

use serde::{Deserialize, Serialize};

use super::aggregator::{BrainScores, RiasecScores, SectionScores, StepsScores};
use super::responses::PersonalInsights;
use super::synthesizer::{
    career_recommendations, dominant_quadrants, employability_quotient, skill_development_areas,
    top_interests, EmployabilityBand,
};

/// Interpretation attached to one scored section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionInterpretation {
    pub text: String,
    pub recommendations: Vec<String>,
}

pub fn interpret(scores: &SectionScores) -> SectionInterpretation {
    match scores {
        SectionScores::Riasec(riasec) => interpret_interest(riasec),
        SectionScores::BrainProfile(brain) => interpret_brain(brain),
        SectionScores::Employability(steps) => interpret_steps(steps),
        SectionScores::PersonalInsights(record) => interpret_insights(record),
    }
}

fn interpret_interest(riasec: &RiasecScores) -> SectionInterpretation {
    let top = top_interests(riasec);
    let names: Vec<_> = top.iter().map(|c| c.display_name()).collect();
    let code: String = top.iter().map(|c| c.letter()).collect();
    let lead = top
        .first()
        .map(|c| format!(" Most of all, {}.", c.description()))
        .unwrap_or_default();

    SectionInterpretation {
        text: format!(
            "Your top interest areas are {} (code {}).{}",
            join_natural(&names),
            code,
            lead
        ),
        recommendations: career_recommendations(&top),
    }
}

fn interpret_brain(brain: &BrainScores) -> SectionInterpretation {
    let dominant = dominant_quadrants(brain);
    let Some(lead) = dominant.first() else {
        return SectionInterpretation::default();
    };
    let mut text = format!(
        "You lead with the {} ({}) quadrant: {}.",
        lead.style_name(),
        lead.label(),
        lead.description()
    );
    if let Some(second) = dominant.get(1) {
        text.push_str(&format!(
            " Your secondary style is {} ({}).",
            second.style_name(),
            second.label()
        ));
    }

    SectionInterpretation {
        text,
        recommendations: lead.learning_tips().iter().map(|t| t.to_string()).collect(),
    }
}

fn interpret_steps(steps: &StepsScores) -> SectionInterpretation {
    let quotient = employability_quotient(steps);
    let band = EmployabilityBand::from_quotient(quotient);

    SectionInterpretation {
        text: format!(
            "Your employability skills score {:.1} out of 10 ({}).",
            quotient, band
        ),
        recommendations: skill_development_areas(steps),
    }
}

fn interpret_insights(record: &PersonalInsights) -> SectionInterpretation {
    let strengths: Vec<_> = record.character_strengths.iter().map(String::as_str).collect();
    let values: Vec<_> = record.values_in_life.iter().map(String::as_str).collect();

    SectionInterpretation {
        text: format!(
            "You describe your strengths as {} and value {}.",
            join_natural(&strengths),
            join_natural(&values)
        ),
        recommendations: record
            .character_strengths
            .iter()
            .take(3)
            .map(|strength| format!("Look for projects that make use of your {}", strength.to_lowercase()))
            .collect(),
    }
}

/// "a", "a and b", "a, b and c".
fn join_natural(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_string(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}
