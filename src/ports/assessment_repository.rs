//! Assessment repository port (write side).
//!
//! Defines the contract for persisting and retrieving `AssessmentSession`
//! aggregates. Implementations handle the actual storage.
//!
//! # Atomic updates
//!
//! All section submissions go through [`AssessmentRepository::update_atomically`]:
//! the adapter locks the record, hands the current snapshot to the mutation,
//! and persists the result only when the mutation succeeds and reports a
//! write. Two racing submissions of the final section are serialized by that
//! lock, so exactly one of them observes an in-progress session and runs
//! synthesis; the other sees the completed session and replays.

use async_trait::async_trait;

use crate::domain::assessment::{AssessmentError, AssessmentSession, SessionTransition};
use crate::domain::foundation::{AssessmentId, DomainError, UserId};

/// Engine step executed against a locked session snapshot.
pub type SessionMutation = Box<
    dyn FnOnce(&mut AssessmentSession) -> Result<SessionTransition, AssessmentError> + Send,
>;

/// Session state after an atomic update, with what the mutation did.
#[derive(Debug, Clone)]
pub struct MutationResult {
    pub session: AssessmentSession,
    pub transition: SessionTransition,
}

/// Repository port for AssessmentSession persistence.
#[async_trait]
pub trait AssessmentRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `ConcurrentModification` if the owner already has an in-progress session
    /// - `DatabaseError` on persistence failure
    async fn save(&self, session: &AssessmentSession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &AssessmentId) -> Result<Option<AssessmentSession>, DomainError>;

    /// Most recently started session of the owner that was not abandoned.
    async fn find_latest_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Option<AssessmentSession>, DomainError>;

    /// The owner's in-progress session, if any.
    async fn find_in_progress_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Option<AssessmentSession>, DomainError>;

    /// Delete a session.
    ///
    /// # Errors
    ///
    /// - `AssessmentNotFound` if session doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &AssessmentId) -> Result<(), DomainError>;

    /// Atomic read-modify-write of one session.
    ///
    /// The mutation runs while the record is locked. On `Err` nothing is
    /// written; on `Ok` the session is written unless the transition reports
    /// no change.
    ///
    /// # Errors
    ///
    /// - `NotFound` if session doesn't exist
    /// - whatever the mutation returns
    /// - `Infrastructure` on persistence failure
    async fn update_atomically(
        &self,
        id: &AssessmentId,
        mutation: SessionMutation,
    ) -> Result<MutationResult, AssessmentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn assessment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AssessmentRepository) {}
    }

    #[test]
    fn mutation_can_be_boxed_from_closure() {
        let _mutation: SessionMutation =
            Box::new(|session: &mut AssessmentSession| session.abandon());
    }
}
