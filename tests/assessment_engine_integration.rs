//! Integration tests for the assessment engine.
//!
//! Drives full assessments through the application handlers and the
//! in-memory repository:
//! 1. Scoring and synthesis of a known answer sheet
//! 2. Racing submissions of the final section synthesize exactly once
//! 3. Replays, retakes and history

use std::sync::Arc;

use futures::future::join_all;
use serde_json::{json, Value};

use mentor_assessment::adapters::memory::InMemoryAssessmentRepository;
use mentor_assessment::application::handlers::assessment::{
    ListAssessmentHistoryHandler, ListAssessmentHistoryQuery, StartAssessmentCommand,
    StartAssessmentHandler, SubmitSectionCommand, SubmitSectionHandler, SubmitSectionResult,
};
use mentor_assessment::domain::assessment::{AssessmentError, SessionTransition};
use mentor_assessment::domain::foundation::{AssessmentId, AssessmentStatus, ErrorCode, UserId};
use mentor_assessment::domain::instrument::catalog::interest_positions_for;
use mentor_assessment::domain::instrument::{BrainQuadrant, InstrumentType, RiasecCategory};
use mentor_assessment::domain::scoring::{
    BrainProfileScoring, EmployabilityBand, ResponseValidator,
};
use mentor_assessment::ports::AssessmentRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Engine {
    repo: InMemoryAssessmentRepository,
    validator: ResponseValidator,
}

impl Engine {
    fn new() -> Self {
        Self::with_scoring(BrainProfileScoring::IndependentRatings)
    }

    fn with_scoring(scoring: BrainProfileScoring) -> Self {
        Self {
            repo: InMemoryAssessmentRepository::new(),
            validator: ResponseValidator::new(scoring),
        }
    }

    async fn start(&self, owner: &str, retake: bool) -> AssessmentId {
        let result = StartAssessmentHandler::new(Arc::new(self.repo.clone()))
            .handle(StartAssessmentCommand {
                user_id: user(owner),
                retake,
            })
            .await
            .unwrap();
        *result.session.id()
    }

    async fn submit(
        &self,
        owner: &str,
        id: AssessmentId,
        section: InstrumentType,
        raw: Value,
    ) -> Result<SubmitSectionResult, AssessmentError> {
        SubmitSectionHandler::new(Arc::new(self.repo.clone()), self.validator)
            .handle(SubmitSectionCommand {
                user_id: user(owner),
                assessment_id: id,
                section,
                raw_responses: raw,
                time_spent_minutes: 5,
            })
            .await
    }
}

fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

/// Interest answers yielding counts R5 I9 A3 S7 E2 C4.
fn interest_answers() -> Value {
    let counts = [
        (RiasecCategory::Realistic, 5),
        (RiasecCategory::Investigative, 9),
        (RiasecCategory::Artistic, 3),
        (RiasecCategory::Social, 7),
        (RiasecCategory::Enterprising, 2),
        (RiasecCategory::Conventional, 4),
    ];
    let mut answers = vec![false; 54];
    for (category, count) in counts {
        for position in interest_positions_for(category).iter().take(count) {
            answers[*position] = true;
        }
    }
    json!(answers)
}

fn brain_answers() -> Value {
    Value::Array(vec![json!([4, 3, 2, 1]); 10])
}

/// STEPS answers with category means 4.0, 3.2, 2.8, 4.4, 3.6.
fn steps_answers() -> Value {
    json!([
        4, 4, 4, 4, 4, //
        4, 3, 3, 3, 3, //
        3, 3, 3, 3, 2, //
        5, 5, 4, 4, 4, //
        4, 4, 4, 3, 3
    ])
}

fn insights_answers() -> Value {
    json!({
        "whatYouLike": "Figuring out how living things work",
        "whatYouAreGoodAt": "Patient explanations for classmates",
        "recentProjects": "Volunteer tutoring in biology",
        "characterStrengths": ["Curiosity", "Kindness", "Perseverance"],
        "valuesInLife": ["Learning", "Helping others", "Health"]
    })
}

fn sheet() -> Vec<(InstrumentType, Value)> {
    vec![
        (InstrumentType::Riasec, interest_answers()),
        (InstrumentType::BrainProfile, brain_answers()),
        (InstrumentType::Employability, steps_answers()),
        (InstrumentType::PersonalInsights, insights_answers()),
    ]
}

// =============================================================================
// Scoring and synthesis
// =============================================================================

#[tokio::test]
async fn known_answer_sheet_produces_expected_composite() {
    let engine = Engine::new();
    let id = engine.start("student-1", false).await;

    let mut last = None;
    for (section, raw) in sheet() {
        last = Some(engine.submit("student-1", id, section, raw).await.unwrap());
    }
    let last = last.unwrap();

    assert!(last.transition.completed_now());
    let composite = last.session.composite_result().unwrap();
    assert_eq!(composite.holland_code, "ISR");
    assert_eq!(composite.employability_quotient, 7.2);
    assert_eq!(composite.employability_band, EmployabilityBand::Good);
    assert_eq!(
        composite.dominant_quadrants,
        vec![BrainQuadrant::L1, BrainQuadrant::L2]
    );
    assert_eq!(
        composite.skill_development_areas,
        vec!["Teamwork and collaboration", "Enterprising and leadership"]
    );
    assert!(composite.career_recommendations.len() <= 10);
    assert_eq!(last.session.total_time_spent_minutes(), 20);
}

#[tokio::test]
async fn sections_may_arrive_in_any_order() {
    let engine = Engine::new();
    let id = engine.start("student-1", false).await;

    let mut sections = sheet();
    sections.reverse();
    let mut transitions = Vec::new();
    for (section, raw) in sections {
        transitions.push(engine.submit("student-1", id, section, raw).await.unwrap().transition);
    }

    assert_eq!(
        transitions.iter().filter(|t| t.completed_now()).count(),
        1
    );
    assert!(transitions.last().unwrap().completed_now());
}

#[tokio::test]
async fn resubmitting_a_section_replaces_its_scores() {
    let engine = Engine::new();
    let id = engine.start("student-1", false).await;

    engine
        .submit("student-1", id, InstrumentType::Riasec, json!(vec![false; 54]))
        .await
        .unwrap();
    let second = engine
        .submit("student-1", id, InstrumentType::Riasec, interest_answers())
        .await
        .unwrap();

    let record = second.session.section(InstrumentType::Riasec).unwrap();
    assert_eq!(record.raw_responses, interest_answers());
    assert_eq!(second.progress().completion_percentage.value(), 25);
}

#[tokio::test]
async fn forced_rank_mode_rejects_ties() {
    let engine = Engine::with_scoring(BrainProfileScoring::ForcedRank);
    let id = engine.start("student-1", false).await;

    let mut sets = vec![json!([4, 3, 2, 1]); 10];
    sets[6] = json!([4, 4, 2, 1]);
    let err = engine
        .submit("student-1", id, InstrumentType::BrainProfile, Value::Array(sets))
        .await
        .unwrap_err();

    match err {
        AssessmentError::Validation(report) => {
            assert!(report.errors().iter().any(|e| e.field().starts_with("brainProfile[6]")));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn racing_final_submissions_synthesize_exactly_once() {
    let engine = Arc::new(Engine::new());
    let id = engine.start("student-1", false).await;
    for (section, raw) in sheet().into_iter().take(3) {
        engine.submit("student-1", id, section, raw).await.unwrap();
    }

    let attempts = (0..8).map(|_| {
        let engine = engine.clone();
        tokio::spawn(async move {
            engine
                .submit("student-1", id, InstrumentType::PersonalInsights, insights_answers())
                .await
        })
    });
    let results: Vec<SubmitSectionResult> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    let completions = results.iter().filter(|r| r.transition.completed_now()).count();
    assert_eq!(completions, 1);
    assert!(results
        .iter()
        .filter(|r| !r.transition.completed_now())
        .all(|r| r.transition == SessionTransition::AlreadyCompleted));

    let composites: Vec<_> = results
        .iter()
        .map(|r| r.session.composite_result().cloned().unwrap())
        .collect();
    assert!(composites.windows(2).all(|pair| pair[0] == pair[1]));

    let stored = engine.repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.composite_result(), Some(&composites[0]));
}

#[tokio::test]
async fn racing_different_sections_are_all_recorded() {
    let engine = Arc::new(Engine::new());
    let id = engine.start("student-1", false).await;

    let attempts = sheet().into_iter().map(|(section, raw)| {
        let engine = engine.clone();
        tokio::spawn(async move { engine.submit("student-1", id, section, raw).await })
    });
    let results: Vec<SubmitSectionResult> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    assert_eq!(results.iter().filter(|r| r.transition.completed_now()).count(), 1);
    let stored = engine.repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status(), AssessmentStatus::Completed);
    assert_eq!(stored.sections().len(), 4);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn completed_assessment_rejects_changes_and_accepts_replays() {
    let engine = Engine::new();
    let id = engine.start("student-1", false).await;
    for (section, raw) in sheet() {
        engine.submit("student-1", id, section, raw).await.unwrap();
    }

    let replay = engine
        .submit("student-1", id, InstrumentType::Riasec, interest_answers())
        .await
        .unwrap();
    assert_eq!(replay.transition, SessionTransition::AlreadyCompleted);

    let err = engine
        .submit("student-1", id, InstrumentType::Riasec, json!(vec![true; 54]))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::AssessmentCompleted);
}

#[tokio::test]
async fn retake_keeps_history_and_opens_new_attempt() {
    let engine = Engine::new();
    let first = engine.start("student-1", false).await;
    for (section, raw) in sheet() {
        engine.submit("student-1", first, section, raw).await.unwrap();
    }

    let second = engine.start("student-1", true).await;
    assert_ne!(first, second);
    engine
        .submit("student-1", second, InstrumentType::Riasec, interest_answers())
        .await
        .unwrap();

    let history = ListAssessmentHistoryHandler::new(Arc::new(engine.repo.clone()), 10)
        .handle(ListAssessmentHistoryQuery {
            user_id: user("student-1"),
            limit: None,
        })
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, first);
    assert_eq!(history[0].holland_code, "ISR");

    let latest = engine
        .repo
        .find_latest_by_owner(&user("student-1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.id(), &second);
}

#[tokio::test]
async fn abandoned_assessment_rejects_submissions() {
    let engine = Engine::new();
    let first = engine.start("student-1", false).await;
    engine.start("student-1", true).await;

    let err = engine
        .submit("student-1", first, InstrumentType::Riasec, interest_answers())
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::AssessmentAbandoned);
}
