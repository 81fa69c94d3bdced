//! In-Memory Assessment Store
//!
//! Implements both `AssessmentRepository` and `AssessmentHistoryReader`.
//! Each record sits behind its own mutex, so atomic updates of one session
//! never block another. Used for tests and local development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::assessment::{AssessmentError, AssessmentSession};
use crate::domain::foundation::{AssessmentId, AssessmentStatus, DomainError, ErrorCode, UserId};
use crate::ports::{
    AssessmentHistoryReader, AssessmentRepository, AssessmentSummary, MutationResult,
    SessionMutation,
};

type Record = Arc<Mutex<AssessmentSession>>;

/// In-memory storage for assessment sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssessmentRepository {
    sessions: Arc<RwLock<HashMap<AssessmentId, Record>>>,
}

impl InMemoryAssessmentRepository {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns true when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    async fn snapshot(&self) -> Vec<AssessmentSession> {
        let records: Vec<Record> = self.sessions.read().await.values().cloned().collect();
        let mut sessions = Vec::with_capacity(records.len());
        for record in records {
            sessions.push(record.lock().await.clone());
        }
        sessions
    }

    async fn owned_by(&self, owner_id: &UserId) -> Vec<AssessmentSession> {
        self.snapshot()
            .await
            .into_iter()
            .filter(|s| s.is_owner(owner_id))
            .collect()
    }
}

#[async_trait]
impl AssessmentRepository for InMemoryAssessmentRepository {
    async fn save(&self, session: &AssessmentSession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;

        if session.status() == AssessmentStatus::InProgress {
            for (id, record) in sessions.iter() {
                if id == session.id() {
                    continue;
                }
                let other = record.lock().await;
                if other.is_owner(session.owner_id())
                    && other.status() == AssessmentStatus::InProgress
                {
                    return Err(DomainError::new(
                        ErrorCode::ConcurrentModification,
                        "Owner already has an assessment in progress",
                    ));
                }
            }
        }

        match sessions.get(session.id()) {
            Some(record) => *record.lock().await = session.clone(),
            None => {
                sessions.insert(*session.id(), Arc::new(Mutex::new(session.clone())));
            }
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &AssessmentId) -> Result<Option<AssessmentSession>, DomainError> {
        let record = self.sessions.read().await.get(id).cloned();
        match record {
            Some(record) => Ok(Some(record.lock().await.clone())),
            None => Ok(None),
        }
    }

    async fn find_latest_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Option<AssessmentSession>, DomainError> {
        Ok(self
            .owned_by(owner_id)
            .await
            .into_iter()
            .filter(|s| s.status() != AssessmentStatus::Abandoned)
            .max_by_key(|s| *s.started_at()))
    }

    async fn find_in_progress_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Option<AssessmentSession>, DomainError> {
        Ok(self
            .owned_by(owner_id)
            .await
            .into_iter()
            .find(|s| s.status() == AssessmentStatus::InProgress))
    }

    async fn delete(&self, id: &AssessmentId) -> Result<(), DomainError> {
        match self.sessions.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(
                ErrorCode::AssessmentNotFound,
                format!("Assessment not found: {}", id),
            )),
        }
    }

    async fn update_atomically(
        &self,
        id: &AssessmentId,
        mutation: SessionMutation,
    ) -> Result<MutationResult, AssessmentError> {
        let record = self
            .sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AssessmentError::not_found(*id))?;

        let mut stored = record.lock().await;
        let mut working = stored.clone();
        let transition = mutation(&mut working)?;
        if transition.is_write() {
            *stored = working.clone();
        }

        Ok(MutationResult {
            session: if transition.is_write() { working } else { stored.clone() },
            transition,
        })
    }
}

#[async_trait]
impl AssessmentHistoryReader for InMemoryAssessmentRepository {
    async fn list_completed(
        &self,
        owner_id: &UserId,
        limit: u32,
    ) -> Result<Vec<AssessmentSummary>, DomainError> {
        let mut completed: Vec<AssessmentSummary> = self
            .owned_by(owner_id)
            .await
            .iter()
            .filter_map(summarize)
            .collect();
        completed.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        completed.truncate(limit as usize);
        Ok(completed)
    }
}

fn summarize(session: &AssessmentSession) -> Option<AssessmentSummary> {
    let composite = session.composite_result()?;
    Some(AssessmentSummary {
        id: *session.id(),
        completed_at: *session.completed_at()?,
        holland_code: composite.holland_code.clone(),
        employability_quotient: composite.employability_quotient,
        total_time_spent_minutes: session.total_time_spent_minutes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::SessionTransition;
    use crate::domain::instrument::InstrumentType;
    use crate::domain::scoring::ResponseValidator;
    use serde_json::{json, Value};

    fn owner(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn new_session(owner_id: &str) -> AssessmentSession {
        AssessmentSession::new(AssessmentId::new(), owner(owner_id))
    }

    fn sections() -> Vec<(InstrumentType, Value)> {
        vec![
            (InstrumentType::Riasec, Value::Array(vec![json!(true); 54])),
            (InstrumentType::BrainProfile, Value::Array(vec![json!([1, 2, 3, 4]); 10])),
            (InstrumentType::Employability, Value::Array(vec![json!(3); 25])),
            (
                InstrumentType::PersonalInsights,
                json!({
                    "whatYouLike": "Helping at the community garden",
                    "whatYouAreGoodAt": "Organising group activities",
                    "recentProjects": "Ran a charity bake sale",
                    "characterStrengths": ["Kindness", "Fairness", "Humour"],
                    "valuesInLife": ["Community", "Health", "Family"]
                }),
            ),
        ]
    }

    async fn complete(repo: &InMemoryAssessmentRepository, id: &AssessmentId) {
        for (instrument, raw) in sections() {
            repo.update_atomically(
                id,
                Box::new(move |session: &mut AssessmentSession| {
                    session.submit_section(&ResponseValidator::default(), instrument, raw, 3)
                }),
            )
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn save_and_find_by_id() {
        let repo = InMemoryAssessmentRepository::new();
        let session = new_session("user-1");

        repo.save(&session).await.unwrap();

        let found = repo.find_by_id(session.id()).await.unwrap();
        assert_eq!(found, Some(session));
    }

    #[tokio::test]
    async fn second_in_progress_session_for_owner_is_rejected() {
        let repo = InMemoryAssessmentRepository::new();
        repo.save(&new_session("user-1")).await.unwrap();

        let err = repo.save(&new_session("user-1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrentModification);

        repo.save(&new_session("user-2")).await.unwrap();
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn failed_mutation_writes_nothing() {
        let repo = InMemoryAssessmentRepository::new();
        let session = new_session("user-1");
        repo.save(&session).await.unwrap();

        let result = repo
            .update_atomically(
                session.id(),
                Box::new(|s: &mut AssessmentSession| {
                    s.submit_section(
                        &ResponseValidator::default(),
                        InstrumentType::Riasec,
                        Value::Array(vec![json!(true); 53]),
                        4,
                    )
                }),
            )
            .await;

        assert!(matches!(result, Err(AssessmentError::Validation(_))));
        assert_eq!(repo.find_by_id(session.id()).await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn update_of_unknown_session_is_not_found() {
        let repo = InMemoryAssessmentRepository::new();
        let id = AssessmentId::new();

        let result = repo
            .update_atomically(&id, Box::new(|s: &mut AssessmentSession| s.abandon()))
            .await;

        assert_eq!(result.unwrap_err(), AssessmentError::not_found(id));
    }

    #[tokio::test]
    async fn replay_after_completion_returns_stored_session() {
        let repo = InMemoryAssessmentRepository::new();
        let session = new_session("user-1");
        repo.save(&session).await.unwrap();
        complete(&repo, session.id()).await;

        let (instrument, raw) = sections().remove(0);
        let result = repo
            .update_atomically(
                session.id(),
                Box::new(move |s: &mut AssessmentSession| {
                    s.submit_section(&ResponseValidator::default(), instrument, raw, 3)
                }),
            )
            .await
            .unwrap();

        assert_eq!(result.transition, SessionTransition::AlreadyCompleted);
        assert_eq!(
            Some(result.session),
            repo.find_by_id(session.id()).await.unwrap()
        );
    }

    #[tokio::test]
    async fn latest_skips_abandoned_sessions() {
        let repo = InMemoryAssessmentRepository::new();
        let first = new_session("user-1");
        repo.save(&first).await.unwrap();
        complete(&repo, first.id()).await;

        let second = new_session("user-1");
        repo.save(&second).await.unwrap();
        repo.update_atomically(second.id(), Box::new(|s: &mut AssessmentSession| s.abandon()))
            .await
            .unwrap();

        let latest = repo.find_latest_by_owner(&owner("user-1")).await.unwrap();
        assert_eq!(latest.map(|s| *s.id()), Some(*first.id()));
        assert!(repo
            .find_in_progress_by_owner(&owner("user-1"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn history_lists_completed_newest_first_with_limit() {
        let repo = InMemoryAssessmentRepository::new();
        let mut ids = Vec::new();
        for _ in 0..3 {
            let session = new_session("user-1");
            repo.save(&session).await.unwrap();
            complete(&repo, session.id()).await;
            ids.push(*session.id());
        }
        repo.save(&new_session("user-1")).await.unwrap();

        let history = repo.list_completed(&owner("user-1"), 2).await.unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, ids[2]);
        assert_eq!(history[1].id, ids[1]);
        assert_eq!(history[0].total_time_spent_minutes, 12);
        assert_eq!(history[0].holland_code, "RIA");
    }

    #[tokio::test]
    async fn delete_removes_session() {
        let repo = InMemoryAssessmentRepository::new();
        let session = new_session("user-1");
        repo.save(&session).await.unwrap();

        repo.delete(session.id()).await.unwrap();

        assert!(repo.is_empty().await);
        assert_eq!(
            repo.delete(session.id()).await.unwrap_err().code,
            ErrorCode::AssessmentNotFound
        );
    }
}
