//! Staff repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use examhall_core::error::{AppError, ErrorKind};
use examhall_core::result::AppResult;
use examhall_entity::staff::Staff;

use crate::traits::StaffDirectory;

/// Read access to the staff directory.
#[derive(Debug, Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    /// Create a new staff repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StaffDirectory for StaffRepository {
    async fn list_all(&self) -> AppResult<Vec<Staff>> {
        sqlx::query_as::<_, Staff>(
            "SELECT staff_id, staff_name, department_id FROM staff ORDER BY staff_id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list staff", e))
    }
}
