//! Exam registration repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use examhall_core::error::{AppError, ErrorKind};
use examhall_core::result::AppResult;
use examhall_core::types::ExamId;
use examhall_entity::student::Registration;

use crate::traits::RegistrationSource;

/// Read access to exam registrations joined with students.
#[derive(Debug, Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    /// Create a new registration repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrationSource for RegistrationRepository {
    async fn find_by_exam(&self, exam_id: ExamId) -> AppResult<Vec<Registration>> {
        sqlx::query_as::<_, Registration>(
            "SELECT r.student_id, s.student_name, s.department_id \
             FROM exam_registrations r \
             INNER JOIN students s ON s.student_id = r.student_id \
             WHERE r.exam_id = $1 \
             ORDER BY r.registration_id ASC",
        )
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load exam registrations", e)
        })
    }
}
