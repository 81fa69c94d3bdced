//! Category vocabularies of the three quantitative instruments.
//!
//! Each enum's declaration order doubles as its fixed tie-break priority:
//! when two categories score the same, the one declared first ranks higher.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Holland interest categories (RIASEC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiasecCategory {
    #[serde(rename = "R")]
    Realistic,
    #[serde(rename = "I")]
    Investigative,
    #[serde(rename = "A")]
    Artistic,
    #[serde(rename = "S")]
    Social,
    #[serde(rename = "E")]
    Enterprising,
    #[serde(rename = "C")]
    Conventional,
}

impl RiasecCategory {
    /// All categories in priority order `R > I > A > S > E > C`.
    pub fn all() -> &'static [RiasecCategory] {
        &[
            RiasecCategory::Realistic,
            RiasecCategory::Investigative,
            RiasecCategory::Artistic,
            RiasecCategory::Social,
            RiasecCategory::Enterprising,
            RiasecCategory::Conventional,
        ]
    }

    /// Single-letter code used in the Holland Code.
    pub fn letter(&self) -> char {
        match self {
            RiasecCategory::Realistic => 'R',
            RiasecCategory::Investigative => 'I',
            RiasecCategory::Artistic => 'A',
            RiasecCategory::Social => 'S',
            RiasecCategory::Enterprising => 'E',
            RiasecCategory::Conventional => 'C',
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RiasecCategory::Realistic => "Realistic",
            RiasecCategory::Investigative => "Investigative",
            RiasecCategory::Artistic => "Artistic",
            RiasecCategory::Social => "Social",
            RiasecCategory::Enterprising => "Enterprising",
            RiasecCategory::Conventional => "Conventional",
        }
    }

    /// One-sentence description used in narratives.
    pub fn description(&self) -> &'static str {
        match self {
            RiasecCategory::Realistic => {
                "you enjoy practical, hands-on work with tools, machines and the physical world"
            }
            RiasecCategory::Investigative => {
                "you are drawn to observing, analysing and solving complex problems"
            }
            RiasecCategory::Artistic => {
                "you value self-expression, originality and unstructured creative work"
            }
            RiasecCategory::Social => {
                "you find energy in helping, teaching and supporting other people"
            }
            RiasecCategory::Enterprising => {
                "you like persuading, leading and taking initiative towards goals"
            }
            RiasecCategory::Conventional => {
                "you prefer structured tasks, clear procedures and accurate detail work"
            }
        }
    }

    /// Fixed career list for this interest area, most typical first.
    pub fn careers(&self) -> &'static [&'static str] {
        match self {
            RiasecCategory::Realistic => &[
                "Mechanical Engineer",
                "Electrician",
                "Civil Engineer",
                "Agricultural Scientist",
                "Aircraft Technician",
            ],
            RiasecCategory::Investigative => &[
                "Data Scientist",
                "Research Scientist",
                "Software Engineer",
                "Pharmacist",
                "Civil Engineer",
            ],
            RiasecCategory::Artistic => &[
                "Graphic Designer",
                "Architect",
                "Content Writer",
                "UX Designer",
                "Musician",
            ],
            RiasecCategory::Social => &[
                "Teacher",
                "Counsellor",
                "Nurse",
                "Social Worker",
                "Human Resources Specialist",
            ],
            RiasecCategory::Enterprising => &[
                "Entrepreneur",
                "Sales Manager",
                "Marketing Manager",
                "Lawyer",
                "Human Resources Specialist",
            ],
            RiasecCategory::Conventional => &[
                "Accountant",
                "Financial Analyst",
                "Auditor",
                "Data Analyst",
                "Office Administrator",
            ],
        }
    }
}

impl fmt::Display for RiasecCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Cognitive-style quadrants of the brain profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BrainQuadrant {
    L1,
    L2,
    R1,
    R2,
}

impl BrainQuadrant {
    /// All quadrants in slot order, which is also the priority `L1 > L2 > R1 > R2`.
    pub fn all() -> &'static [BrainQuadrant] {
        &[
            BrainQuadrant::L1,
            BrainQuadrant::L2,
            BrainQuadrant::R1,
            BrainQuadrant::R2,
        ]
    }

    /// Position of this quadrant inside each 4-statement set.
    pub fn slot(&self) -> usize {
        match self {
            BrainQuadrant::L1 => 0,
            BrainQuadrant::L2 => 1,
            BrainQuadrant::R1 => 2,
            BrainQuadrant::R2 => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BrainQuadrant::L1 => "L1",
            BrainQuadrant::L2 => "L2",
            BrainQuadrant::R1 => "R1",
            BrainQuadrant::R2 => "R2",
        }
    }

    pub fn style_name(&self) -> &'static str {
        match self {
            BrainQuadrant::L1 => "Analytical",
            BrainQuadrant::L2 => "Organized",
            BrainQuadrant::R1 => "Strategic",
            BrainQuadrant::R2 => "Empathic",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BrainQuadrant::L1 => {
                "you think in a logical, fact-based and quantitative way"
            }
            BrainQuadrant::L2 => {
                "you think in a sequential, planned and detail-oriented way"
            }
            BrainQuadrant::R1 => {
                "you think in an imaginative, big-picture and experimental way"
            }
            BrainQuadrant::R2 => {
                "you think in an interpersonal, expressive and feeling-based way"
            }
        }
    }

    /// Learning-style tips for people who lead with this quadrant.
    pub fn learning_tips(&self) -> &'static [&'static str] {
        match self {
            BrainQuadrant::L1 => &[
                "Work through data, worked examples and case analyses",
                "Ask for the underlying theory before practising",
                "Summarise new material as logical outlines",
            ],
            BrainQuadrant::L2 => &[
                "Follow structured courses with clear milestones",
                "Keep checklists and step-by-step notes",
                "Practise with repetition and timed exercises",
            ],
            BrainQuadrant::R1 => &[
                "Start from the big picture and connect ideas with mind maps",
                "Learn through experiments and open-ended projects",
                "Use metaphors and visuals to anchor concepts",
            ],
            BrainQuadrant::R2 => &[
                "Learn in groups and discuss ideas with peers",
                "Relate material to people and real experiences",
                "Teach what you learn to someone else",
            ],
        }
    }
}

impl fmt::Display for BrainQuadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// STEPS employability categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepsCategory {
    SelfManagement,
    Teamwork,
    Enterprising,
    ProblemSolving,
    SpeakingListening,
}

impl StepsCategory {
    /// All categories in questionnaire order.
    pub fn all() -> &'static [StepsCategory] {
        &[
            StepsCategory::SelfManagement,
            StepsCategory::Teamwork,
            StepsCategory::Enterprising,
            StepsCategory::ProblemSolving,
            StepsCategory::SpeakingListening,
        ]
    }

    /// Short code as printed on the STEPS scale.
    pub fn code(&self) -> &'static str {
        match self {
            StepsCategory::SelfManagement => "S",
            StepsCategory::Teamwork => "T",
            StepsCategory::Enterprising => "E",
            StepsCategory::ProblemSolving => "P",
            StepsCategory::SpeakingListening => "Speaking",
        }
    }

    /// Label used when the category is suggested for development.
    pub fn development_area(&self) -> &'static str {
        match self {
            StepsCategory::SelfManagement => "Self-management and initiative",
            StepsCategory::Teamwork => "Teamwork and collaboration",
            StepsCategory::Enterprising => "Enterprising and leadership",
            StepsCategory::ProblemSolving => "Problem solving and critical thinking",
            StepsCategory::SpeakingListening => "Speaking and listening",
        }
    }
}

impl fmt::Display for StepsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
