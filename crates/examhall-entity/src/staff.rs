//! Staff entity.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use examhall_core::types::{DepartmentId, StaffId};

/// A staff member who may invigilate exam rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    /// Staff identifier.
    pub staff_id: StaffId,
    /// Full name.
    pub staff_name: String,
    /// Department the staff member belongs to.
    pub department_id: DepartmentId,
}
