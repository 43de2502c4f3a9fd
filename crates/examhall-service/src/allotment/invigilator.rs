//! Binds caller-chosen staff to rooms.

use std::collections::{HashMap, HashSet};

use examhall_core::types::StaffId;
use examhall_entity::staff::Staff;

use super::error::AllotmentError;

/// Validates requested invigilators against the staff directory.
///
/// Construction fails when the directory is empty, even if every room's
/// invigilators were requested explicitly and no lookup would be needed.
/// Callers rely on that precondition being checked before anything is
/// written.
#[derive(Debug, Clone)]
pub struct InvigilatorBinder {
    directory: HashMap<StaffId, Staff>,
}

impl InvigilatorBinder {
    /// Creates a binder over the full staff directory.
    pub fn new(directory: Vec<Staff>) -> Result<Self, AllotmentError> {
        if directory.is_empty() {
            return Err(AllotmentError::NoStaffAvailable);
        }

        Ok(Self {
            directory: directory
                .into_iter()
                .map(|staff| (staff.staff_id, staff))
                .collect(),
        })
    }

    /// Staff bound to one room: the requested ids deduplicated (first
    /// occurrence wins) with unknown ids dropped.
    ///
    /// A room with no request gets no invigilators; there is no fallback.
    pub fn bind(&self, requested: Option<&[StaffId]>) -> Vec<StaffId> {
        let Some(requested) = requested else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        requested
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .filter(|id| self.directory.contains_key(id))
            .collect()
    }

    /// Looks up a staff record.
    pub fn staff(&self, staff_id: StaffId) -> Option<&Staff> {
        self.directory.get(&staff_id)
    }
}
