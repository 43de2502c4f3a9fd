//! Resolves the rooms chosen for an exam and checks they can seat everyone.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use examhall_core::error::AppError;
use examhall_core::types::RoomId;
use examhall_database::traits::RoomLookup;
use examhall_entity::room::Room;

use super::error::AllotmentError;

/// Rooms resolved for one run, in the order the caller listed them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomPlan {
    /// Resolved rooms. Unknown and repeated ids are dropped.
    pub rooms: Vec<Room>,
    /// Sum of the resolved rooms' capacities.
    pub total_capacity: usize,
}

impl RoomPlan {
    /// Orders resolved rooms by the caller's id list.
    ///
    /// Ids that did not resolve are skipped; a repeated id keeps its first
    /// position. Fails when nothing resolved.
    pub fn from_resolved(
        requested: &[RoomId],
        resolved: Vec<Room>,
    ) -> Result<Self, AllotmentError> {
        let mut by_id: HashMap<RoomId, Room> =
            resolved.into_iter().map(|room| (room.room_id, room)).collect();
        let mut seen = HashSet::new();

        let rooms: Vec<Room> = requested
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| by_id.remove(id))
            .collect();

        if rooms.is_empty() {
            return Err(AllotmentError::NoValidRooms);
        }

        let total_capacity = rooms.iter().map(Room::seat_count).sum();
        Ok(Self {
            rooms,
            total_capacity,
        })
    }

    /// Fails when there are more registrants than seats. Spare seats are
    /// fine and simply stay empty.
    pub fn ensure_capacity(&self, registrants: usize) -> Result<(), AllotmentError> {
        if registrants > self.total_capacity {
            return Err(AllotmentError::InsufficientCapacity {
                required: registrants,
                available: self.total_capacity,
            });
        }
        Ok(())
    }
}

/// Resolves room ids through the room repository.
#[derive(Clone)]
pub struct RoomCapacityPlanner {
    rooms: Arc<dyn RoomLookup>,
}

impl RoomCapacityPlanner {
    /// Creates a planner over a room lookup.
    pub fn new(rooms: Arc<dyn RoomLookup>) -> Self {
        Self { rooms }
    }

    /// Resolves the requested rooms, keeping the caller's order.
    pub async fn resolve(&self, room_ids: &[RoomId]) -> Result<RoomPlan, AppError> {
        let resolved = self.rooms.find_by_ids(room_ids).await?;
        Ok(RoomPlan::from_resolved(room_ids, resolved)?)
    }
}
