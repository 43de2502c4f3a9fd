//! Allotment repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use examhall_core::error::{AppError, ErrorKind};
use examhall_core::result::AppResult;
use examhall_core::types::ExamId;
use examhall_entity::allotment::{AllotmentDetail, InvigilatorDetail, NewAllotment, RoomInvigilator};

use crate::traits::AllotmentStore;

/// Rows per multi-value INSERT; five binds per row stays well under the
/// 65535 bind parameter limit.
const INSERT_BATCH_SIZE: usize = 1000;

/// Repository for allotment and room invigilator rows.
#[derive(Debug, Clone)]
pub struct AllotmentRepository {
    pool: PgPool,
}

impl AllotmentRepository {
    /// Create a new allotment repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        let kind = match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => ErrorKind::Conflict,
            _ => ErrorKind::Database,
        };
        AppError::with_source(kind, message, e)
    }
}

#[async_trait]
impl AllotmentStore for AllotmentRepository {
    async fn replace_for_exam(
        &self,
        exam_id: ExamId,
        allotments: &[NewAllotment],
        invigilators: &[RoomInvigilator],
    ) -> AppResult<u64> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin allotment transaction"))?;

        // Serializes regeneration of the same exam across connections and
        // processes; released on commit or rollback.
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(i64::from(exam_id.get()))
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to lock exam for regeneration"))?;

        let removed = sqlx::query("DELETE FROM allotments WHERE exam_id = $1")
            .bind(exam_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete previous allotments"))?
            .rows_affected();

        sqlx::query("DELETE FROM room_invigilators WHERE exam_id = $1")
            .bind(exam_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete previous invigilators"))?;

        debug!(exam_id = %exam_id, removed, "Cleared previous allotments");

        let mut written = 0u64;
        for chunk in allotments.chunks(INSERT_BATCH_SIZE) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO allotments (exam_id, student_id, room_id, seat_number, assigned_staff_id) ",
            );
            builder.push_values(chunk, |mut row, allotment| {
                row.push_bind(exam_id)
                    .push_bind(allotment.student_id.clone())
                    .push_bind(allotment.room_id)
                    .push_bind(allotment.seat_number)
                    .push_bind(allotment.assigned_staff_id);
            });
            written += builder
                .build()
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to insert allotments"))?
                .rows_affected();
        }

        for binding in invigilators {
            sqlx::query(
                "INSERT INTO room_invigilators (exam_id, room_id, staff_id) VALUES ($1, $2, $3)",
            )
            .bind(binding.exam_id)
            .bind(binding.room_id)
            .bind(binding.staff_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to insert room invigilator"))?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit allotment transaction"))?;

        Ok(written)
    }

    async fn find_details(&self, exam_id: ExamId) -> AppResult<Vec<AllotmentDetail>> {
        sqlx::query_as::<_, AllotmentDetail>(
            "SELECT a.allotment_id, a.student_id, st.student_name, st.department_id, \
                    d.department_name, a.room_id, r.room_number, r.capacity, r.room_type, \
                    a.seat_number, a.assigned_staff_id, sf.staff_name, \
                    sf.department_id AS staff_department_id \
             FROM allotments a \
             INNER JOIN students st ON st.student_id = a.student_id \
             INNER JOIN departments d ON d.department_id = st.department_id \
             INNER JOIN rooms r ON r.room_id = a.room_id \
             LEFT JOIN staff sf ON sf.staff_id = a.assigned_staff_id \
             WHERE a.exam_id = $1 \
             ORDER BY a.room_id ASC, a.seat_number ASC",
        )
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load allotments"))
    }

    async fn find_invigilators(&self, exam_id: ExamId) -> AppResult<Vec<InvigilatorDetail>> {
        sqlx::query_as::<_, InvigilatorDetail>(
            "SELECT ri.room_id, ri.staff_id, s.staff_name, s.department_id \
             FROM room_invigilators ri \
             INNER JOIN staff s ON s.staff_id = ri.staff_id \
             WHERE ri.exam_id = $1 \
             ORDER BY ri.room_id ASC, ri.id ASC",
        )
        .bind(exam_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to load room invigilators"))
    }
}
