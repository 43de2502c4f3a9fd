//! Allotment and room invigilator records.
//!
//! Both tables are owned by the allotment engine and are fully replaced
//! for an exam on every regeneration.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use examhall_core::types::{DepartmentId, ExamId, RoomId, StaffId, StudentId};

/// A seat produced by the assigner, not yet bound to an invigilator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatAssignment {
    /// Seated student.
    pub student_id: StudentId,
    /// Room the seat belongs to.
    pub room_id: RoomId,
    /// 1-based seat position inside the room.
    pub seat_number: i32,
}

/// An allotment ready to be written for an exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAllotment {
    /// Seated student.
    pub student_id: StudentId,
    /// Room the seat belongs to.
    pub room_id: RoomId,
    /// 1-based seat position inside the room.
    pub seat_number: i32,
    /// First invigilator bound to the room, if any.
    pub assigned_staff_id: Option<StaffId>,
}

impl NewAllotment {
    /// Bind a seat to the room's lead invigilator.
    pub fn from_seat(seat: SeatAssignment, assigned_staff_id: Option<StaffId>) -> Self {
        Self {
            student_id: seat.student_id,
            room_id: seat.room_id,
            seat_number: seat.seat_number,
            assigned_staff_id,
        }
    }
}

/// A persisted allotment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Allotment {
    /// Surrogate key.
    pub allotment_id: i32,
    /// Exam the seat is for.
    pub exam_id: ExamId,
    /// Seated student.
    pub student_id: StudentId,
    /// Room the seat belongs to.
    pub room_id: RoomId,
    /// 1-based seat position inside the room.
    pub seat_number: i32,
    /// Lead invigilator of the room, if any.
    pub assigned_staff_id: Option<StaffId>,
}

/// A staff member bound to supervise a room for an exam.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RoomInvigilator {
    /// Exam being supervised.
    pub exam_id: ExamId,
    /// Supervised room.
    pub room_id: RoomId,
    /// Supervising staff member.
    pub staff_id: StaffId,
}

/// Allotment joined with student, department, room and assigned staff.
///
/// This is the read shape used by the grouped allotment query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AllotmentDetail {
    /// Surrogate key.
    pub allotment_id: i32,
    /// Seated student.
    pub student_id: StudentId,
    /// Student name.
    pub student_name: String,
    /// Student's department.
    pub department_id: DepartmentId,
    /// Department name.
    pub department_name: String,
    /// Room the seat belongs to.
    pub room_id: RoomId,
    /// Room number.
    pub room_number: String,
    /// Room capacity.
    pub capacity: i32,
    /// Room type.
    pub room_type: String,
    /// 1-based seat position inside the room.
    pub seat_number: i32,
    /// Lead invigilator of the room, if any.
    pub assigned_staff_id: Option<StaffId>,
    /// Lead invigilator's name.
    pub staff_name: Option<String>,
    /// Lead invigilator's department.
    pub staff_department_id: Option<DepartmentId>,
}

/// Invigilator binding joined with the staff record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InvigilatorDetail {
    /// Supervised room.
    pub room_id: RoomId,
    /// Supervising staff member.
    pub staff_id: StaffId,
    /// Staff name.
    pub staff_name: String,
    /// Staff department.
    pub department_id: DepartmentId,
}
