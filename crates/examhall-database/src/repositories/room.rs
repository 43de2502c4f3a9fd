//! Room repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use examhall_core::error::{AppError, ErrorKind};
use examhall_core::result::AppResult;
use examhall_core::types::RoomId;
use examhall_entity::room::Room;

use crate::traits::RoomLookup;

/// Read access to exam rooms.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomLookup for RoomRepository {
    async fn find_by_ids(&self, room_ids: &[RoomId]) -> AppResult<Vec<Room>> {
        if room_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = room_ids.iter().map(|id| id.get()).collect();
        sqlx::query_as::<_, Room>(
            "SELECT room_id, room_number, capacity, room_type FROM rooms \
             WHERE room_id = ANY($1) ORDER BY room_id ASC",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find rooms", e))
    }
}
