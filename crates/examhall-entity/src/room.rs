//! Exam room entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use examhall_core::types::RoomId;

/// A room that can seat students during an exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Room identifier.
    pub room_id: RoomId,
    /// Human-facing room number, e.g. `B-204`.
    pub room_number: String,
    /// Number of seats. Always positive.
    pub capacity: i32,
    /// Room type, e.g. `Classroom` or `Lab`.
    pub room_type: String,
}

impl Room {
    /// Seats available for assignment.
    pub fn seat_count(&self) -> usize {
        usize::try_from(self.capacity).unwrap_or(0)
    }
}
