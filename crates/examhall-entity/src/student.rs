//! Department and exam registration records.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use examhall_core::types::{DepartmentId, StudentId};

/// An academic department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    /// Department identifier.
    pub department_id: DepartmentId,
    /// Department name.
    pub department_name: String,
}

/// A student registered to sit an exam, joined with the student's department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Student identifier.
    pub student_id: StudentId,
    /// Student name.
    pub student_name: String,
    /// Department used by the anti-clustering heuristic.
    pub department_id: DepartmentId,
}

/// A student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Student identifier.
    pub student_id: StudentId,
    /// Student name.
    pub student_name: String,
    /// Department the student belongs to.
    pub department_id: DepartmentId,
}

impl From<&Student> for Registration {
    fn from(student: &Student) -> Self {
        Self {
            student_id: student.student_id.clone(),
            student_name: student.student_name.clone(),
            department_id: student.department_id,
        }
    }
}
