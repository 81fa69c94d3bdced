//! PostgreSQL implementation of AssessmentRepository and AssessmentHistoryReader.
//!
//! The aggregate is stored as a JSONB document next to indexed projection
//! columns. Atomic updates lock the row with `SELECT ... FOR UPDATE` inside a
//! transaction, so concurrent submissions to one session are serialized.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::types::Json;
use sqlx::{Postgres, Row, Transaction};

use crate::domain::assessment::{AssessmentError, AssessmentSession};
use crate::domain::foundation::{AssessmentId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::{
    AssessmentHistoryReader, AssessmentRepository, AssessmentSummary, MutationResult,
    SessionMutation,
};

/// Postgres error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL implementation of the assessment ports.
#[derive(Clone)]
pub struct PostgresAssessmentRepository {
    pool: PgPool,
}

impl PostgresAssessmentRepository {
    /// Creates a new PostgresAssessmentRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(
        &self,
        sql: &str,
        owner_id: &UserId,
    ) -> Result<Option<AssessmentSession>, DomainError> {
        let row = sqlx::query(sql)
            .bind(owner_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch assessment: {}", e),
                )
            })?;

        row.map(row_to_session).transpose()
    }
}

#[async_trait]
impl AssessmentRepository for PostgresAssessmentRepository {
    async fn save(&self, session: &AssessmentSession) -> Result<(), DomainError> {
        let minutes = minutes_column(session)?;
        sqlx::query(
            r#"
            INSERT INTO assessments (
                id, owner_id, status, catalog_version, document, holland_code,
                employability_quotient, total_time_spent_minutes, started_at,
                completed_at, updated_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (id) DO UPDATE SET
                status = EXCLUDED.status,
                document = EXCLUDED.document,
                holland_code = EXCLUDED.holland_code,
                employability_quotient = EXCLUDED.employability_quotient,
                total_time_spent_minutes = EXCLUDED.total_time_spent_minutes,
                completed_at = EXCLUDED.completed_at,
                updated_at = EXCLUDED.updated_at,
                version = EXCLUDED.version
            "#,
        )
        .bind(session.id().as_uuid())
        .bind(session.owner_id().as_str())
        .bind(session.status().as_str())
        .bind(session.catalog_version())
        .bind(Json(session))
        .bind(session.composite_result().map(|c| c.holland_code.clone()))
        .bind(session.composite_result().map(|c| c.employability_quotient))
        .bind(minutes)
        .bind(session.started_at().as_datetime())
        .bind(session.completed_at().map(|t| *t.as_datetime()))
        .bind(session.updated_at().as_datetime())
        .bind(session.version() as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(
                    ErrorCode::ConcurrentModification,
                    "Owner already has an assessment in progress",
                )
            } else {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to insert assessment: {}", e),
                )
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &AssessmentId) -> Result<Option<AssessmentSession>, DomainError> {
        let row = sqlx::query("SELECT document FROM assessments WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch assessment: {}", e),
                )
            })?;

        row.map(row_to_session).transpose()
    }

    async fn find_latest_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Option<AssessmentSession>, DomainError> {
        self.find_one(
            r#"
            SELECT document FROM assessments
            WHERE owner_id = $1 AND status <> 'abandoned'
            ORDER BY started_at DESC
            LIMIT 1
            "#,
            owner_id,
        )
        .await
    }

    async fn find_in_progress_by_owner(
        &self,
        owner_id: &UserId,
    ) -> Result<Option<AssessmentSession>, DomainError> {
        self.find_one(
            "SELECT document FROM assessments WHERE owner_id = $1 AND status = 'in_progress'",
            owner_id,
        )
        .await
    }

    async fn delete(&self, id: &AssessmentId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM assessments WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to delete assessment: {}", e),
                )
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::AssessmentNotFound,
                format!("Assessment not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn update_atomically(
        &self,
        id: &AssessmentId,
        mutation: SessionMutation,
    ) -> Result<MutationResult, AssessmentError> {
        let mut tx = self.pool.begin().await.map_err(infrastructure)?;

        let row = sqlx::query("SELECT document FROM assessments WHERE id = $1 FOR UPDATE")
            .bind(id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(infrastructure)?
            .ok_or_else(|| AssessmentError::not_found(*id))?;
        let mut session = row_to_session(row)?;
        let expected_version = session.version();

        // An Err here drops `tx`, which rolls the lock back.
        let transition = mutation(&mut session)?;

        if transition.is_write() {
            write_locked(&mut tx, &session, expected_version).await?;
            tx.commit().await.map_err(infrastructure)?;
        } else {
            tx.rollback().await.map_err(infrastructure)?;
        }

        Ok(MutationResult {
            session,
            transition,
        })
    }
}

#[async_trait]
impl AssessmentHistoryReader for PostgresAssessmentRepository {
    async fn list_completed(
        &self,
        owner_id: &UserId,
        limit: u32,
    ) -> Result<Vec<AssessmentSummary>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, completed_at, holland_code, employability_quotient,
                   total_time_spent_minutes
            FROM assessments
            WHERE owner_id = $1 AND status = 'completed'
            ORDER BY completed_at DESC
            LIMIT $2
            "#,
        )
        .bind(owner_id.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list assessment history: {}", e),
            )
        })?;

        rows.into_iter().map(row_to_summary).collect()
    }
}

async fn write_locked(
    tx: &mut Transaction<'_, Postgres>,
    session: &AssessmentSession,
    expected_version: u64,
) -> Result<(), AssessmentError> {
    let minutes = minutes_column(session)?;
    let result = sqlx::query(
        r#"
        UPDATE assessments SET
            status = $2,
            document = $3,
            holland_code = $4,
            employability_quotient = $5,
            total_time_spent_minutes = $6,
            completed_at = $7,
            updated_at = $8,
            version = $9
        WHERE id = $1 AND version = $10
        "#,
    )
    .bind(session.id().as_uuid())
    .bind(session.status().as_str())
    .bind(Json(session))
    .bind(session.composite_result().map(|c| c.holland_code.clone()))
    .bind(session.composite_result().map(|c| c.employability_quotient))
    .bind(minutes)
    .bind(session.completed_at().map(|t| *t.as_datetime()))
    .bind(session.updated_at().as_datetime())
    .bind(session.version() as i64)
    .bind(expected_version as i64)
    .execute(&mut **tx)
    .await
    .map_err(infrastructure)?;

    if result.rows_affected() == 0 {
        return Err(AssessmentError::consistency(format!(
            "Assessment {} changed during update",
            session.id()
        )));
    }
    Ok(())
}

fn row_to_session(row: PgRow) -> Result<AssessmentSession, DomainError> {
    let Json(session): Json<AssessmentSession> = row.try_get("document").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to decode assessment document: {}", e),
        )
    })?;
    Ok(session)
}

fn row_to_summary(row: PgRow) -> Result<AssessmentSummary, DomainError> {
    let decode = |e: sqlx::Error| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to decode assessment summary: {}", e),
        )
    };

    let id: uuid::Uuid = row.try_get("id").map_err(decode)?;
    let completed_at: chrono::DateTime<chrono::Utc> = row.try_get("completed_at").map_err(decode)?;
    let holland_code: String = row.try_get("holland_code").map_err(decode)?;
    let quotient: f64 = row.try_get("employability_quotient").map_err(decode)?;
    let minutes: i32 = row.try_get("total_time_spent_minutes").map_err(decode)?;

    Ok(AssessmentSummary {
        id: AssessmentId::from_uuid(id),
        completed_at: Timestamp::from_datetime(completed_at),
        holland_code,
        employability_quotient: quotient,
        total_time_spent_minutes: u32::try_from(minutes).unwrap_or(0),
    })
}

fn minutes_column(session: &AssessmentSession) -> Result<i32, DomainError> {
    i32::try_from(session.total_time_spent_minutes()).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!(
                "Total time spent of {} minutes does not fit the assessments table",
                session.total_time_spent_minutes()
            ),
        )
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == UNIQUE_VIOLATION)
        .unwrap_or(false)
}

fn infrastructure(err: sqlx::Error) -> AssessmentError {
    AssessmentError::infrastructure(format!("Database error: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::AssessmentStatus;

    #[test]
    fn status_strings_match_sql_literals() {
        assert_eq!(AssessmentStatus::InProgress.as_str(), "in_progress");
        assert_eq!(AssessmentStatus::Completed.as_str(), "completed");
        assert_eq!(AssessmentStatus::Abandoned.as_str(), "abandoned");
    }

    #[test]
    fn minutes_column_holds_the_largest_accepted_total() {
        use crate::domain::foundation::UserId;
        use crate::domain::instrument::catalog::MAX_SECTION_MINUTES;
        use crate::domain::instrument::InstrumentType;
        use crate::domain::scoring::ResponseValidator;
        use serde_json::{json, Value};

        let mut session =
            AssessmentSession::new(AssessmentId::new(), UserId::new("user-1").unwrap());
        session
            .submit_section(
                &ResponseValidator::default(),
                InstrumentType::Employability,
                Value::Array(vec![json!(3); 25]),
                MAX_SECTION_MINUTES,
            )
            .unwrap();

        assert_eq!(minutes_column(&session).unwrap(), MAX_SECTION_MINUTES as i32);
    }

    #[test]
    fn non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn infrastructure_errors_keep_cause() {
        let err = infrastructure(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, AssessmentError::Infrastructure(msg) if msg.contains("pool timed out")));
    }
}
