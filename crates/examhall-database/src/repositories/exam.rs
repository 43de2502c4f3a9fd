//! Exam repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use examhall_core::error::{AppError, ErrorKind};
use examhall_core::result::AppResult;
use examhall_core::types::ExamId;
use examhall_entity::exam::{Exam, ExamSummary};

use crate::traits::ExamLookup;

/// Read access to exams and their subjects.
#[derive(Debug, Clone)]
pub struct ExamRepository {
    pool: PgPool,
}

impl ExamRepository {
    /// Create a new exam repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExamLookup for ExamRepository {
    async fn find_exam(&self, exam_id: ExamId) -> AppResult<Option<Exam>> {
        sqlx::query_as::<_, Exam>(
            "SELECT exam_id, subject_id, exam_date, start_time, end_time, session \
             FROM exams WHERE exam_id = $1",
        )
        .bind(exam_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find exam", e))
    }

    async fn find_summary(&self, exam_id: ExamId) -> AppResult<Option<ExamSummary>> {
        sqlx::query_as::<_, ExamSummary>(
            "SELECT e.exam_id, e.subject_id, s.subject_code, s.subject_name, \
                    e.exam_date, e.start_time, e.end_time, e.session \
             FROM exams e \
             INNER JOIN subjects s ON s.subject_id = e.subject_id \
             WHERE e.exam_id = $1",
        )
        .bind(exam_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find exam summary", e))
    }
}
