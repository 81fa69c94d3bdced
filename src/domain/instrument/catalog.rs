//! Instrument Catalog - static, versioned question sets.
//!
//! Read-only reference data consumed by the validator, the aggregator and the
//! catalog endpoint. Response arrays are positional: entry `i` answers
//! question `i` of the matching table.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use super::{BrainQuadrant, InstrumentType, RiasecCategory, StepsCategory};

/// Version stamped on every assessment administered against these tables.
pub const CATALOG_VERSION: &str = "2024.1";

/// Number of interest inventory statements.
pub const INTEREST_QUESTION_COUNT: usize = 54;

/// Number of brain profile statement sets.
pub const BRAIN_SET_COUNT: usize = 10;

/// Statements (and therefore numbers) per brain profile set.
pub const BRAIN_SLOTS: usize = 4;

/// Number of STEPS statements.
pub const STEPS_QUESTION_COUNT: usize = 25;

/// STEPS statements per category.
pub const STEPS_PER_CATEGORY: usize = 5;

/// Ceiling for one independent brain profile rating.
pub const BRAIN_RATING_MAX: i64 = 10;

/// Ceiling for the time reported on one section submission (a full day).
pub const MAX_SECTION_MINUTES: u32 = 24 * 60;

/// Likert bounds for STEPS answers.
pub const LIKERT_MIN: i64 = 1;
pub const LIKERT_MAX: i64 = 5;

/// Minimum characters for each personal insights free-text field.
pub const MIN_INSIGHT_TEXT_CHARS: usize = 10;

/// Minimum selections for each personal insights list.
pub const MIN_INSIGHT_SELECTIONS: usize = 3;

/// One interest inventory statement, answered yes/no.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InterestQuestion {
    pub id: usize,
    pub category: RiasecCategory,
    pub text: &'static str,
}

/// One brain profile set: four statements bound to `[L1, L2, R1, R2]`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BrainStatementSet {
    pub id: usize,
    pub statements: [&'static str; BRAIN_SLOTS],
}

/// One STEPS statement, answered on a 1-5 scale.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StepsQuestion {
    pub id: usize,
    pub category: StepsCategory,
    pub text: &'static str,
}

use RiasecCategory::{
    Artistic as A, Conventional as C, Enterprising as E, Investigative as I, Realistic as R,
    Social as S,
};

const INTEREST_ITEMS: [(RiasecCategory, &str); INTEREST_QUESTION_COUNT] = [
    (R, "I like to work on cars or machines"),
    (I, "I like to do puzzles"),
    (A, "I am good at working independently on creative ideas"),
    (S, "I like to work in teams"),
    (E, "I am an ambitious person who sets goals"),
    (C, "I like to organise things like files, desks or offices"),
    (R, "I like to build things"),
    (I, "I like to do experiments"),
    (A, "I like to read about art and music"),
    (S, "I like to teach or train people"),
    (E, "I like to try to influence or persuade people"),
    (C, "I like to have clear instructions to follow"),
    (R, "I like to take care of animals"),
    (I, "I enjoy science"),
    (A, "I enjoy creative writing"),
    (S, "I like trying to help people solve their problems"),
    (E, "I like selling things"),
    (C, "I wouldn't mind working eight hours a day in an office"),
    (R, "I like putting things together or assembling things"),
    (I, "I enjoy trying to figure out how things work"),
    (A, "I am a creative person"),
    (S, "I am interested in healing people"),
    (E, "I am a quick learner of new responsibilities"),
    (C, "I pay attention to details"),
    (R, "I like to cook"),
    (I, "I like to analyse things like problems or situations"),
    (A, "I like to play instruments or sing"),
    (S, "I enjoy learning about other cultures"),
    (E, "I would like to start my own business"),
    (C, "I like to do filing or typing"),
    (R, "I am a practical person"),
    (I, "I like working with numbers or charts"),
    (A, "I like acting in plays"),
    (S, "I like to get into discussions about issues"),
    (E, "I like to lead"),
    (C, "I am good at keeping records of my work"),
    (R, "I like working outdoors"),
    (I, "I'm good at math"),
    (A, "I like to draw"),
    (S, "I like helping people"),
    (E, "I like to give speeches"),
    (C, "I like to work in an office"),
    (R, "I enjoy repairing things with tools"),
    (I, "I enjoy reading about scientific discoveries"),
    (A, "I like designing things such as clothes, posters or rooms"),
    (S, "I enjoy volunteering in my community"),
    (E, "I enjoy negotiating deals"),
    (C, "I like checking figures for errors"),
    (R, "I like operating equipment or vehicles"),
    (I, "I like asking why things happen"),
    (A, "I like taking photographs or making videos"),
    (S, "I am good at listening to people's worries"),
    (E, "I like competing to win"),
    (C, "I like following a set daily routine"),
];

const BRAIN_SETS: [[&str; BRAIN_SLOTS]; BRAIN_SET_COUNT] = [
    [
        "I make decisions based on facts",
        "I plan my work before starting",
        "I trust my intuition about new ideas",
        "I consider how decisions affect people",
    ],
    [
        "I enjoy working with numbers",
        "I keep my things well organised",
        "I imagine future possibilities",
        "I enjoy talking things through with others",
    ],
    [
        "I like to understand how things work",
        "I follow instructions carefully",
        "I like to try new ways of doing things",
        "I notice how other people are feeling",
    ],
    [
        "I prefer precise, technical explanations",
        "I like having a fixed schedule",
        "I like to see the big picture first",
        "I learn best by sharing experiences",
    ],
    [
        "I question information before accepting it",
        "I finish one task before starting the next",
        "I enjoy brainstorming many ideas",
        "I like helping people feel included",
    ],
    [
        "I solve problems with logic",
        "I check my work for mistakes",
        "I enjoy taking calculated risks",
        "I express my feelings openly",
    ],
    [
        "I like to measure results",
        "I prefer tried and tested methods",
        "I get bored with routine",
        "I enjoy teamwork more than working alone",
    ],
    [
        "I am good at critical analysis",
        "I like making lists and checklists",
        "I think in pictures and metaphors",
        "I care about harmony in a group",
    ],
    [
        "I prefer to work with data",
        "I am punctual and reliable",
        "I like to combine ideas from different fields",
        "I enjoy mentoring or coaching others",
    ],
    [
        "I like debating ideas on their merits",
        "I like clear rules and procedures",
        "I act on hunches",
        "I remember people's stories",
    ],
];

const STEPS_ITEMS: [&str; STEPS_QUESTION_COUNT] = [
    // Self-management
    "I manage my time well to meet deadlines",
    "I take responsibility for my own learning",
    "I stay calm under pressure",
    "I set personal goals and track my progress",
    "I can motivate myself without supervision",
    // Teamwork
    "I contribute my share of work in a group",
    "I respect other people's opinions in a team",
    "I help resolve disagreements in a group",
    "I share information with my teammates",
    "I adapt my role to what the team needs",
    // Enterprising
    "I look for opportunities to improve things",
    "I am willing to take on leadership roles",
    "I come up with new ideas and act on them",
    "I can persuade others to support my ideas",
    "I am comfortable taking reasonable risks",
    // Problem-solving
    "I break complex problems into smaller parts",
    "I gather information before making a decision",
    "I consider several solutions before choosing one",
    "I learn from mistakes and try again",
    "I can evaluate whether a solution worked",
    // Speaking and listening
    "I express my ideas clearly when speaking",
    "I listen carefully without interrupting",
    "I ask questions to check my understanding",
    "I adjust how I speak to my audience",
    "I am confident presenting to a group",
];

/// Character strength options offered to clients.
pub const CHARACTER_STRENGTH_OPTIONS: &[&str] = &[
    "Creativity",
    "Curiosity",
    "Perseverance",
    "Honesty",
    "Kindness",
    "Leadership",
    "Teamwork",
    "Fairness",
    "Humility",
    "Self-regulation",
    "Gratitude",
    "Humour",
];

/// Values-in-life options offered to clients.
pub const VALUES_IN_LIFE_OPTIONS: &[&str] = &[
    "Family",
    "Financial security",
    "Independence",
    "Helping others",
    "Achievement",
    "Adventure",
    "Recognition",
    "Knowledge",
    "Health",
    "Stability",
    "Creativity",
    "Faith",
];

static INTEREST_QUESTIONS: Lazy<Vec<InterestQuestion>> = Lazy::new(|| {
    INTEREST_ITEMS
        .iter()
        .enumerate()
        .map(|(index, (category, text))| InterestQuestion {
            id: index + 1,
            category: *category,
            text: *text,
        })
        .collect()
});

static BRAIN_STATEMENT_SETS: Lazy<Vec<BrainStatementSet>> = Lazy::new(|| {
    BRAIN_SETS
        .iter()
        .enumerate()
        .map(|(index, statements)| BrainStatementSet {
            id: index + 1,
            statements: *statements,
        })
        .collect()
});

static STEPS_QUESTIONS: Lazy<Vec<StepsQuestion>> = Lazy::new(|| {
    STEPS_ITEMS
        .iter()
        .enumerate()
        .map(|(index, text)| StepsQuestion {
            id: index + 1,
            category: StepsCategory::all()[index / STEPS_PER_CATEGORY],
            text: *text,
        })
        .collect()
});

static INTEREST_INDEX: Lazy<HashMap<RiasecCategory, Vec<usize>>> = Lazy::new(|| {
    let mut index: HashMap<RiasecCategory, Vec<usize>> = HashMap::new();
    for (position, question) in INTEREST_QUESTIONS.iter().enumerate() {
        index.entry(question.category).or_default().push(position);
    }
    index
});

/// Interest inventory statements in answer order.
pub fn interest_questions() -> &'static [InterestQuestion] {
    &INTEREST_QUESTIONS
}

/// Brain profile sets in answer order.
pub fn brain_statement_sets() -> &'static [BrainStatementSet] {
    &BRAIN_STATEMENT_SETS
}

/// STEPS statements in answer order.
pub fn steps_questions() -> &'static [StepsQuestion] {
    &STEPS_QUESTIONS
}

/// Zero-based answer positions tagged with `category`.
pub fn interest_positions_for(category: RiasecCategory) -> &'static [usize] {
    INTEREST_INDEX
        .get(&category)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Zero-based answer positions belonging to a STEPS category.
pub fn steps_positions_for(category: StepsCategory) -> std::ops::Range<usize> {
    let start = category_index(category) * STEPS_PER_CATEGORY;
    start..start + STEPS_PER_CATEGORY
}

fn category_index(category: StepsCategory) -> usize {
    StepsCategory::all()
        .iter()
        .position(|c| *c == category)
        .unwrap_or_default()
}

/// Number of positional entries expected for an array-shaped instrument.
///
/// Personal insights is a record, not an array, and has no entry count.
pub fn expected_entries(instrument: InstrumentType) -> Option<usize> {
    match instrument {
        InstrumentType::Riasec => Some(INTEREST_QUESTION_COUNT),
        InstrumentType::BrainProfile => Some(BRAIN_SET_COUNT),
        InstrumentType::Employability => Some(STEPS_QUESTION_COUNT),
        InstrumentType::PersonalInsights => None,
    }
}

/// Label of the statement a brain-profile slot is bound to.
pub fn brain_slot_quadrant(slot: usize) -> Option<BrainQuadrant> {
    BrainQuadrant::all().get(slot).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interest_inventory_has_54_questions_9_per_category() {
        assert_eq!(interest_questions().len(), INTEREST_QUESTION_COUNT);
        for category in RiasecCategory::all() {
            assert_eq!(interest_positions_for(*category).len(), 9, "{:?}", category);
        }
    }

    #[test]
    fn interest_question_ids_are_one_based_and_sequential() {
        for (index, question) in interest_questions().iter().enumerate() {
            assert_eq!(question.id, index + 1);
        }
    }

    #[test]
    fn brain_profile_has_10_sets_of_4() {
        assert_eq!(brain_statement_sets().len(), BRAIN_SET_COUNT);
        assert!(brain_statement_sets()
            .iter()
            .all(|set| set.statements.iter().all(|s| !s.is_empty())));
    }

    #[test]
    fn steps_has_25_questions_in_blocks_of_5() {
        assert_eq!(steps_questions().len(), STEPS_QUESTION_COUNT);
        for category in StepsCategory::all() {
            let positions = steps_positions_for(*category);
            assert_eq!(positions.len(), STEPS_PER_CATEGORY);
            for position in positions {
                assert_eq!(steps_questions()[position].category, *category);
            }
        }
    }

    #[test]
    fn expected_entries_per_instrument() {
        assert_eq!(expected_entries(InstrumentType::Riasec), Some(54));
        assert_eq!(expected_entries(InstrumentType::BrainProfile), Some(10));
        assert_eq!(expected_entries(InstrumentType::Employability), Some(25));
        assert_eq!(expected_entries(InstrumentType::PersonalInsights), None);
    }

    #[test]
    fn brain_slots_map_to_quadrants() {
        assert_eq!(brain_slot_quadrant(0), Some(BrainQuadrant::L1));
        assert_eq!(brain_slot_quadrant(3), Some(BrainQuadrant::R2));
        assert_eq!(brain_slot_quadrant(4), None);
    }

    #[test]
    fn option_lists_offer_enough_choices() {
        assert!(CHARACTER_STRENGTH_OPTIONS.len() >= MIN_INSIGHT_SELECTIONS);
        assert!(VALUES_IN_LIFE_OPTIONS.len() >= MIN_INSIGHT_SELECTIONS);
    }
}
