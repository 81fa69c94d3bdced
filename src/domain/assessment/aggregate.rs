//! AssessmentSession aggregate entity.
//!
//! One attempt by one owner at the four-section assessment. The session is
//! pure data plus the state machine; storage happens through the
//! `AssessmentRepository` port, which applies mutations atomically.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::{AssessmentError, AssessmentProgress, SectionRecord, SectionsCompleted, SessionTransition};
use crate::domain::foundation::{
    AssessmentId, AssessmentStatus, StateMachine, Timestamp, UserId, ValidationError,
};
use crate::domain::instrument::catalog::MAX_SECTION_MINUTES;
use crate::domain::instrument::{InstrumentType, CATALOG_VERSION};
use crate::domain::scoring::{
    interpret, score, synthesize, CompositeResult, ResponseValidator, SectionScores,
    ValidationReport,
};

/// Assessment session aggregate.
///
/// # Invariants
///
/// - `status == Completed` iff every section is recorded iff `composite_result` is set
/// - a section's scores are derived only from its own raw responses
/// - `composite_result` never changes once set
/// - `total_time_spent_minutes` is the sum of per-section time spent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSession {
    id: AssessmentId,
    owner_id: UserId,
    status: AssessmentStatus,
    catalog_version: String,
    sections: BTreeMap<InstrumentType, SectionRecord>,
    composite_result: Option<CompositeResult>,
    total_time_spent_minutes: u32,
    started_at: Timestamp,
    completed_at: Option<Timestamp>,
    updated_at: Timestamp,
    version: u64,
}

impl AssessmentSession {
    /// Creates a new in-progress session with no sections completed.
    pub fn new(id: AssessmentId, owner_id: UserId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            owner_id,
            status: AssessmentStatus::InProgress,
            catalog_version: CATALOG_VERSION.to_string(),
            sections: BTreeMap::new(),
            composite_result: None,
            total_time_spent_minutes: 0,
            started_at: now,
            completed_at: None,
            updated_at: now,
            version: 0,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: AssessmentId,
        owner_id: UserId,
        status: AssessmentStatus,
        catalog_version: String,
        sections: BTreeMap<InstrumentType, SectionRecord>,
        composite_result: Option<CompositeResult>,
        started_at: Timestamp,
        completed_at: Option<Timestamp>,
        updated_at: Timestamp,
        version: u64,
    ) -> Self {
        let total_time_spent_minutes = total_minutes(&sections);
        Self {
            id,
            owner_id,
            status,
            catalog_version,
            sections,
            composite_result,
            total_time_spent_minutes,
            started_at,
            completed_at,
            updated_at,
            version,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the session ID.
    pub fn id(&self) -> &AssessmentId {
        &self.id
    }

    /// Returns the owner's user ID.
    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    /// Returns the current status.
    pub fn status(&self) -> AssessmentStatus {
        self.status
    }

    /// Returns the catalog version the session was administered against.
    pub fn catalog_version(&self) -> &str {
        &self.catalog_version
    }

    /// Returns the stored result of one section, if submitted.
    pub fn section(&self, instrument: InstrumentType) -> Option<&SectionRecord> {
        self.sections.get(&instrument)
    }

    /// Returns all submitted sections in canonical order.
    pub fn sections(&self) -> &BTreeMap<InstrumentType, SectionRecord> {
        &self.sections
    }

    /// Returns the composite result; present only once completed.
    pub fn composite_result(&self) -> Option<&CompositeResult> {
        self.composite_result.as_ref()
    }

    pub fn total_time_spent_minutes(&self) -> u32 {
        self.total_time_spent_minutes
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns the number of persisted mutations.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Completion flag per section.
    pub fn sections_completed(&self) -> SectionsCompleted {
        let mut flags = SectionsCompleted::default();
        for instrument in self.sections.keys() {
            flags.set(*instrument);
        }
        flags
    }

    /// Client-facing completion projection.
    pub fn progress(&self) -> AssessmentProgress {
        AssessmentProgress::new(self.sections_completed(), self.composite_result.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given user owns this session.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Validates that the user can access this session.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if user is not the owner
    pub fn authorize(&self, user_id: &UserId) -> Result<(), AssessmentError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(AssessmentError::forbidden())
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates, scores and stores one section.
    ///
    /// When the fourth section lands, the composite result is synthesized and
    /// the session completes in the same call. Rejected submissions leave the
    /// session untouched.
    ///
    /// # Errors
    ///
    /// - `Validation` if the raw responses break the instrument's contract
    /// - `InvalidState` if the session is abandoned, or completed and the
    ///   payload differs from what was recorded
    pub fn submit_section(
        &mut self,
        validator: &ResponseValidator,
        instrument: InstrumentType,
        raw_responses: Value,
        time_spent_minutes: u32,
    ) -> Result<SessionTransition, AssessmentError> {
        match self.status {
            AssessmentStatus::Abandoned => return Err(AssessmentError::abandoned()),
            AssessmentStatus::Completed => return self.replay(instrument, &raw_responses),
            AssessmentStatus::InProgress => {}
        }

        let parsed = validator.parse(instrument, &raw_responses);
        let mut errors = match &parsed {
            Ok(_) => Vec::new(),
            Err(report) => report.errors().to_vec(),
        };
        if time_spent_minutes > MAX_SECTION_MINUTES {
            errors.push(ValidationError::out_of_range(
                "timeSpentMinutes",
                0,
                i64::from(MAX_SECTION_MINUTES),
                i64::from(time_spent_minutes),
            ));
        }
        let responses = match parsed {
            Ok(responses) if errors.is_empty() => responses,
            _ => {
                return Err(AssessmentError::validation(ValidationReport::from_errors(
                    errors,
                )))
            }
        };
        let scores = score(&responses);
        let interpretation = interpret(&scores);

        self.sections.insert(
            instrument,
            SectionRecord {
                raw_responses,
                scores,
                time_spent_minutes,
                completed_at: Timestamp::now(),
                interpretation,
            },
        );
        self.total_time_spent_minutes = total_minutes(&self.sections);
        self.touch();

        if self.sections_completed().all() {
            self.complete()?;
            Ok(SessionTransition::Completed { section: instrument })
        } else {
            Ok(SessionTransition::SectionRecorded { section: instrument })
        }
    }

    /// Marks an in-progress session as abandoned.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the session is already completed or abandoned
    pub fn abandon(&mut self) -> Result<SessionTransition, AssessmentError> {
        let current = self.status;
        self.status = current
            .transition_to(AssessmentStatus::Abandoned)
            .map_err(|_| match current {
                AssessmentStatus::Completed => AssessmentError::already_completed(),
                _ => AssessmentError::abandoned(),
            })?;
        self.touch();
        Ok(SessionTransition::Abandoned)
    }

    /// Computes the composite result from the recorded sections.
    ///
    /// # Errors
    ///
    /// - `InvalidState` (`SectionMissing`) if any section has not been scored
    pub fn synthesize_composite(&self) -> Result<CompositeResult, AssessmentError> {
        for instrument in InstrumentType::all() {
            if !self.sections.contains_key(instrument) {
                return Err(AssessmentError::section_missing(instrument.key()));
            }
        }

        let riasec = match self.scores_of(InstrumentType::Riasec) {
            Some(SectionScores::Riasec(scores)) => scores,
            _ => return Err(AssessmentError::section_missing(InstrumentType::Riasec.key())),
        };
        let brain = match self.scores_of(InstrumentType::BrainProfile) {
            Some(SectionScores::BrainProfile(scores)) => scores,
            _ => return Err(AssessmentError::section_missing(InstrumentType::BrainProfile.key())),
        };
        let steps = match self.scores_of(InstrumentType::Employability) {
            Some(SectionScores::Employability(scores)) => scores,
            _ => return Err(AssessmentError::section_missing(InstrumentType::Employability.key())),
        };

        Ok(synthesize(riasec, brain, steps))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn complete(&mut self) -> Result<(), AssessmentError> {
        if self.composite_result.is_some() {
            return Err(AssessmentError::already_completed());
        }
        let next = self
            .status
            .transition_to(AssessmentStatus::Completed)
            .map_err(|e| AssessmentError::invalid_state(e.to_string()))?;
        let composite = self.synthesize_composite()?;

        self.status = next;
        self.composite_result = Some(composite);
        self.completed_at = Some(self.updated_at);
        Ok(())
    }

    /// An identical resubmission against a completed session is a retry.
    fn replay(
        &self,
        instrument: InstrumentType,
        raw_responses: &Value,
    ) -> Result<SessionTransition, AssessmentError> {
        match self.sections.get(&instrument) {
            Some(record) if &record.raw_responses == raw_responses => {
                Ok(SessionTransition::AlreadyCompleted)
            }
            _ => Err(AssessmentError::already_completed()),
        }
    }

    fn scores_of(&self, instrument: InstrumentType) -> Option<&SectionScores> {
        self.sections.get(&instrument).map(|record| &record.scores)
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
        self.version += 1;
    }
}

fn total_minutes(sections: &BTreeMap<InstrumentType, SectionRecord>) -> u32 {
    sections
        .values()
        .fold(0u32, |total, record| total.saturating_add(record.time_spent_minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use serde_json::json;

    fn owner() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn session() -> AssessmentSession {
        AssessmentSession::new(AssessmentId::new(), owner())
    }

    fn validator() -> ResponseValidator {
        ResponseValidator::default()
    }

    fn riasec_raw() -> Value {
        Value::Array((0..54).map(|i| Value::Bool(i % 6 == 1 || i % 6 == 3)).collect())
    }

    fn brain_raw() -> Value {
        Value::Array(vec![json!([4, 3, 2, 1]); 10])
    }

    fn steps_raw() -> Value {
        Value::Array(vec![json!(4); 25])
    }

    fn insights_raw() -> Value {
        json!({
            "whatYouLike": "Solving puzzles with friends",
            "whatYouAreGoodAt": "Mathematics and chess",
            "recentProjects": "Organised a school science fair",
            "characterStrengths": ["Curiosity", "Leadership", "Patience"],
            "valuesInLife": ["Family", "Integrity", "Learning"]
        })
    }

    fn submit(
        session: &mut AssessmentSession,
        instrument: InstrumentType,
        raw: Value,
    ) -> Result<SessionTransition, AssessmentError> {
        session.submit_section(&validator(), instrument, raw, 5)
    }

    fn complete_all(session: &mut AssessmentSession) {
        submit(session, InstrumentType::Riasec, riasec_raw()).unwrap();
        submit(session, InstrumentType::BrainProfile, brain_raw()).unwrap();
        submit(session, InstrumentType::Employability, steps_raw()).unwrap();
        submit(session, InstrumentType::PersonalInsights, insights_raw()).unwrap();
    }

    #[test]
    fn new_session_is_in_progress_and_empty() {
        let session = session();
        assert_eq!(session.status(), AssessmentStatus::InProgress);
        assert_eq!(session.catalog_version(), CATALOG_VERSION);
        assert_eq!(session.progress().completion_percentage.value(), 0);
        assert!(session.composite_result().is_none());
        assert_eq!(session.version(), 0);
    }

    #[test]
    fn recording_a_section_updates_flags_and_time() {
        let mut session = session();
        let transition = submit(&mut session, InstrumentType::Riasec, riasec_raw()).unwrap();

        assert_eq!(
            transition,
            SessionTransition::SectionRecorded {
                section: InstrumentType::Riasec
            }
        );
        assert!(session.sections_completed().riasec);
        assert_eq!(session.total_time_spent_minutes(), 5);
        assert_eq!(session.version(), 1);
        assert_eq!(
            session.progress().next_section,
            Some(InstrumentType::BrainProfile)
        );
    }

    #[test]
    fn invalid_submission_leaves_session_unchanged() {
        let mut session = session();
        let before = session.clone();
        let raw = Value::Array(vec![Value::Bool(true); 53]);

        let err = submit(&mut session, InstrumentType::Riasec, raw).unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(err.to_string().contains("exactly 54 entries, got 53"));
        assert_eq!(session, before);
    }

    #[test]
    fn resubmitting_before_completion_overwrites_section() {
        let mut session = session();
        submit(&mut session, InstrumentType::Employability, steps_raw()).unwrap();
        let first = session.section(InstrumentType::Employability).unwrap().scores.clone();

        submit(&mut session, InstrumentType::Employability, steps_raw()).unwrap();
        let second = session.section(InstrumentType::Employability).unwrap().scores.clone();

        assert_eq!(first, second);
        assert_eq!(session.total_time_spent_minutes(), 5);
        assert_eq!(session.version(), 2);
    }

    #[test]
    fn fourth_section_completes_and_synthesizes() {
        let mut session = session();
        submit(&mut session, InstrumentType::Riasec, riasec_raw()).unwrap();
        submit(&mut session, InstrumentType::BrainProfile, brain_raw()).unwrap();
        submit(&mut session, InstrumentType::Employability, steps_raw()).unwrap();
        let transition =
            submit(&mut session, InstrumentType::PersonalInsights, insights_raw()).unwrap();

        assert!(transition.completed_now());
        assert_eq!(session.status(), AssessmentStatus::Completed);
        assert!(session.completed_at().is_some());
        assert_eq!(session.total_time_spent_minutes(), 20);

        let composite = session.composite_result().unwrap();
        assert_eq!(composite.holland_code, "ISR");
        assert_eq!(composite.employability_quotient, 8.0);
        assert_eq!(session.progress().completion_percentage.value(), 100);
        assert_eq!(session.progress().next_section, None);
    }

    #[test]
    fn identical_replay_after_completion_is_a_no_op() {
        let mut session = session();
        complete_all(&mut session);
        let before = session.clone();

        let transition =
            submit(&mut session, InstrumentType::PersonalInsights, insights_raw()).unwrap();

        assert_eq!(transition, SessionTransition::AlreadyCompleted);
        assert!(!transition.is_write());
        assert_eq!(session, before);
    }

    #[test]
    fn different_payload_after_completion_is_rejected() {
        let mut session = session();
        complete_all(&mut session);

        let err = submit(
            &mut session,
            InstrumentType::Employability,
            Value::Array(vec![json!(1); 25]),
        )
        .unwrap_err();

        assert_eq!(err.code(), ErrorCode::AssessmentCompleted);
        assert_eq!(session.status(), AssessmentStatus::Completed);
    }

    #[test]
    fn abandoned_session_rejects_submissions() {
        let mut session = session();
        session.abandon().unwrap();

        let err = submit(&mut session, InstrumentType::Riasec, riasec_raw()).unwrap_err();
        assert_eq!(err.code(), ErrorCode::AssessmentAbandoned);
    }

    #[test]
    fn abandon_is_rejected_on_terminal_states() {
        let mut completed = session();
        complete_all(&mut completed);
        assert_eq!(
            completed.abandon().unwrap_err().code(),
            ErrorCode::AssessmentCompleted
        );

        let mut abandoned = session();
        abandoned.abandon().unwrap();
        assert_eq!(
            abandoned.abandon().unwrap_err().code(),
            ErrorCode::AssessmentAbandoned
        );
    }

    #[test]
    fn synthesis_requires_every_section() {
        let mut session = session();
        submit(&mut session, InstrumentType::Riasec, riasec_raw()).unwrap();

        let err = session.synthesize_composite().unwrap_err();
        assert_eq!(err.code(), ErrorCode::SectionMissing);
    }

    #[test]
    fn authorize_rejects_other_users() {
        let session = session();
        assert!(session.authorize(&owner()).is_ok());
        assert_eq!(
            session.authorize(&UserId::new("someone-else").unwrap()),
            Err(AssessmentError::Forbidden)
        );
    }

    #[test]
    fn session_survives_json_round_trip() {
        let mut session = session();
        complete_all(&mut session);

        let json = serde_json::to_string(&session).unwrap();
        let restored: AssessmentSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }

    #[test]
    fn reported_minutes_above_a_day_are_rejected_with_response_errors() {
        let mut session = session();
        submit(&mut session, InstrumentType::Riasec, riasec_raw()).unwrap();
        let before = session.clone();

        let err = session
            .submit_section(&validator(), InstrumentType::Employability, steps_raw(), u32::MAX)
            .unwrap_err();
        let AssessmentError::Validation(report) = err else {
            panic!("expected a validation error");
        };
        assert_eq!(
            report.errors(),
            &[ValidationError::out_of_range(
                "timeSpentMinutes",
                0,
                i64::from(MAX_SECTION_MINUTES),
                i64::from(u32::MAX),
            )]
        );
        assert_eq!(session, before);

        let err = session
            .submit_section(
                &validator(),
                InstrumentType::Employability,
                Value::Array(vec![json!(9); 25]),
                MAX_SECTION_MINUTES + 1,
            )
            .unwrap_err();
        let AssessmentError::Validation(report) = err else {
            panic!("expected a validation error");
        };
        assert!(report.errors().len() > 1);
        assert_eq!(report.errors().last().unwrap().field(), "timeSpentMinutes");
    }

    #[test]
    fn total_time_at_the_per_section_ceiling_is_exact() {
        let mut session = session();
        for (instrument, raw) in [
            (InstrumentType::Riasec, riasec_raw()),
            (InstrumentType::BrainProfile, brain_raw()),
            (InstrumentType::Employability, steps_raw()),
            (InstrumentType::PersonalInsights, insights_raw()),
        ] {
            session
                .submit_section(&validator(), instrument, raw, MAX_SECTION_MINUTES)
                .unwrap();
        }

        assert_eq!(session.total_time_spent_minutes(), 4 * MAX_SECTION_MINUTES);
    }

    #[test]
    fn top_rated_brain_profile_survives_a_json_round_trip() {
        let mut session = session();
        let top = Value::Array(vec![json!([10, 10, 10, 10]); 10]);
        submit(&mut session, InstrumentType::BrainProfile, top).unwrap();

        let stored = serde_json::to_string(&session).unwrap();
        let restored: AssessmentSession = serde_json::from_str(&stored).unwrap();
        assert_eq!(restored, session);

        let huge = Value::Array(vec![json!([1e308, 1, 1, 1]); 10]);
        let err = submit(&mut session, InstrumentType::BrainProfile, huge).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(session, restored);
    }
}
