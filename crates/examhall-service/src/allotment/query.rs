//! Reads a stored allotment back, grouped by room.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use examhall_core::error::AppError;
use examhall_core::types::{DepartmentId, ExamId, StudentId};
use examhall_database::traits::{AllotmentStore, ExamLookup};
use examhall_entity::allotment::{AllotmentDetail, InvigilatorDetail};
use examhall_entity::exam::ExamSummary;
use examhall_entity::room::Room;
use examhall_entity::staff::Staff;

use super::error::AllotmentError;

/// One seated student as shown in the grouped view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllotmentEntry {
    /// Stored allotment row id.
    pub allotment_id: i32,
    /// Seated student.
    pub student_id: StudentId,
    /// Student display name.
    pub student_name: String,
    /// Department of the student.
    pub department_id: DepartmentId,
    /// Department display name.
    pub department_name: String,
    /// Room label, e.g. `A-101`.
    pub room_number: String,
    /// Seat within the room, starting at 1.
    pub seat_number: i32,
}

/// The allotments of one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAllotmentGroup {
    /// The room these seats belong to.
    pub room: Room,
    /// Assigned staff of the first row seen for the room.
    pub assigned_staff: Option<Staff>,
    /// Every invigilator bound to the room, in binding order.
    pub invigilators: Vec<Staff>,
    /// Seats in ascending seat order.
    pub allotments: Vec<AllotmentEntry>,
}

/// An exam's allotment grouped by room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamAllotmentView {
    /// Exam with its subject resolved.
    pub exam: ExamSummary,
    /// Rooms holding at least one seat, in room order.
    pub rooms: Vec<RoomAllotmentGroup>,
}

impl ExamAllotmentView {
    /// Total seated students across all rooms.
    pub fn seated(&self) -> usize {
        self.rooms.iter().map(|r| r.allotments.len()).sum()
    }
}

/// Groups joined rows by room.
///
/// `details` must already be ordered by room id then seat number; rooms
/// appear in the order their first row does. Invigilator bindings for
/// rooms without seated students are not reported.
pub fn group_by_room(
    exam: ExamSummary,
    details: Vec<AllotmentDetail>,
    invigilators: &[InvigilatorDetail],
) -> ExamAllotmentView {
    let mut rooms: Vec<RoomAllotmentGroup> = Vec::new();

    for detail in details {
        let starts_group = rooms
            .last()
            .is_none_or(|group| group.room.room_id != detail.room_id);

        if starts_group {
            rooms.push(RoomAllotmentGroup {
                room: Room {
                    room_id: detail.room_id,
                    room_number: detail.room_number.clone(),
                    capacity: detail.capacity,
                    room_type: detail.room_type.clone(),
                },
                assigned_staff: assigned_staff(&detail),
                invigilators: invigilators
                    .iter()
                    .filter(|i| i.room_id == detail.room_id)
                    .map(|i| Staff {
                        staff_id: i.staff_id,
                        staff_name: i.staff_name.clone(),
                        department_id: i.department_id,
                    })
                    .collect(),
                allotments: Vec::new(),
            });
        }

        if let Some(group) = rooms.last_mut() {
            group.allotments.push(AllotmentEntry {
                allotment_id: detail.allotment_id,
                student_id: detail.student_id,
                student_name: detail.student_name,
                department_id: detail.department_id,
                department_name: detail.department_name,
                room_number: detail.room_number,
                seat_number: detail.seat_number,
            });
        }
    }

    ExamAllotmentView { exam, rooms }
}

fn assigned_staff(detail: &AllotmentDetail) -> Option<Staff> {
    match (
        detail.assigned_staff_id,
        detail.staff_name.as_ref(),
        detail.staff_department_id,
    ) {
        (Some(staff_id), Some(staff_name), Some(department_id)) => Some(Staff {
            staff_id,
            staff_name: staff_name.clone(),
            department_id,
        }),
        _ => None,
    }
}

/// Read side of the allotment engine.
#[derive(Clone)]
pub struct AllotmentQuery {
    exams: Arc<dyn ExamLookup>,
    store: Arc<dyn AllotmentStore>,
}

impl AllotmentQuery {
    /// Creates a query over the exam lookup and allotment store.
    pub fn new(exams: Arc<dyn ExamLookup>, store: Arc<dyn AllotmentStore>) -> Self {
        Self { exams, store }
    }

    /// The stored allotment of an exam, grouped by room.
    pub async fn find_by_exam(&self, exam_id: ExamId) -> Result<ExamAllotmentView, AppError> {
        let details = self.store.find_details(exam_id).await?;
        if details.is_empty() {
            return Err(AllotmentError::NoAllotments(exam_id).into());
        }

        let exam = self
            .exams
            .find_summary(exam_id)
            .await?
            .ok_or(AllotmentError::ExamNotFound(exam_id))?;
        let invigilators = self.store.find_invigilators(exam_id).await?;

        let view = group_by_room(exam, details, &invigilators);
        debug!(
            exam_id = %exam_id,
            rooms = view.rooms.len(),
            seated = view.seated(),
            "Loaded grouped allotment"
        );
        Ok(view)
    }
}
