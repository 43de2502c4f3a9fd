//! In-memory repository implementation using a Tokio mutex.
//!
//! Backs the `memory` storage backend and the test suites. A single lock
//! guards every table, so [`AllotmentStore::replace_for_exam`] is atomic
//! with respect to every other call on the same instance.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use examhall_core::error::{AppError, ErrorKind};
use examhall_core::result::AppResult;
use examhall_core::types::{DepartmentId, ExamId, RoomId, StaffId, StudentId, SubjectId};
use examhall_entity::allotment::{
    Allotment, AllotmentDetail, InvigilatorDetail, NewAllotment, RoomInvigilator,
};
use examhall_entity::exam::{Exam, ExamSummary, Subject};
use examhall_entity::room::Room;
use examhall_entity::staff::Staff;
use examhall_entity::student::{Department, Registration, Student};

use crate::traits::{AllotmentStore, ExamLookup, RegistrationSource, RoomLookup, StaffDirectory};

/// A registration pair as it appears in seed files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRegistration {
    /// Exam the student sits.
    pub exam_id: ExamId,
    /// Registered student.
    pub student_id: StudentId,
}

/// Reference data loaded into a [`MemoryDatabase`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SeedData {
    /// Departments.
    pub departments: Vec<Department>,
    /// Subjects.
    pub subjects: Vec<Subject>,
    /// Exams.
    pub exams: Vec<Exam>,
    /// Rooms.
    pub rooms: Vec<Room>,
    /// Staff directory.
    pub staff: Vec<Staff>,
    /// Students.
    pub students: Vec<Student>,
    /// Exam registrations, in registration order.
    pub registrations: Vec<SeedRegistration>,
}

#[derive(Debug, Default)]
struct Tables {
    departments: HashMap<DepartmentId, Department>,
    subjects: HashMap<SubjectId, Subject>,
    exams: HashMap<ExamId, Exam>,
    rooms: BTreeMap<RoomId, Room>,
    staff: BTreeMap<StaffId, Staff>,
    students: HashMap<StudentId, Student>,
    registrations: Vec<SeedRegistration>,
    allotments: Vec<Allotment>,
    invigilators: Vec<RoomInvigilator>,
    next_allotment_id: i32,
}

/// Process-local implementation of every repository capability.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryDatabase {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a database pre-populated with reference data.
    pub fn from_seed(seed: SeedData) -> Self {
        let tables = Tables {
            departments: seed
                .departments
                .into_iter()
                .map(|d| (d.department_id, d))
                .collect(),
            subjects: seed.subjects.into_iter().map(|s| (s.subject_id, s)).collect(),
            exams: seed.exams.into_iter().map(|e| (e.exam_id, e)).collect(),
            rooms: seed.rooms.into_iter().map(|r| (r.room_id, r)).collect(),
            staff: seed.staff.into_iter().map(|s| (s.staff_id, s)).collect(),
            students: seed
                .students
                .into_iter()
                .map(|s| (s.student_id.clone(), s))
                .collect(),
            registrations: seed.registrations,
            next_allotment_id: 1,
            ..Tables::default()
        };
        Self {
            tables: Arc::new(Mutex::new(tables)),
        }
    }

    /// Loads reference data from a JSON seed file.
    pub async fn load_seed_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to read seed file '{}'", path.display()),
                e,
            )
        })?;
        let seed: SeedData = serde_json::from_str(&raw)?;
        info!(
            path = %path.display(),
            exams = seed.exams.len(),
            rooms = seed.rooms.len(),
            staff = seed.staff.len(),
            students = seed.students.len(),
            registrations = seed.registrations.len(),
            "Loaded in-memory seed data"
        );
        Ok(Self::from_seed(seed))
    }

    /// Adds or replaces a department.
    pub async fn insert_department(&self, department: Department) {
        let mut tables = self.tables.lock().await;
        tables.departments.insert(department.department_id, department);
    }

    /// Adds or replaces a subject.
    pub async fn insert_subject(&self, subject: Subject) {
        let mut tables = self.tables.lock().await;
        tables.subjects.insert(subject.subject_id, subject);
    }

    /// Adds or replaces an exam.
    pub async fn insert_exam(&self, exam: Exam) {
        let mut tables = self.tables.lock().await;
        tables.exams.insert(exam.exam_id, exam);
    }

    /// Adds or replaces a room.
    pub async fn insert_room(&self, room: Room) {
        let mut tables = self.tables.lock().await;
        tables.rooms.insert(room.room_id, room);
    }

    /// Adds or replaces a staff member.
    pub async fn insert_staff(&self, staff: Staff) {
        let mut tables = self.tables.lock().await;
        tables.staff.insert(staff.staff_id, staff);
    }

    /// Adds or replaces a student.
    pub async fn insert_student(&self, student: Student) {
        let mut tables = self.tables.lock().await;
        tables.students.insert(student.student_id.clone(), student);
    }

    /// Registers a student for an exam. Duplicate pairs are ignored.
    pub async fn register(&self, exam_id: ExamId, student_id: StudentId) {
        let mut tables = self.tables.lock().await;
        let exists = tables
            .registrations
            .iter()
            .any(|r| r.exam_id == exam_id && r.student_id == student_id);
        if !exists {
            tables.registrations.push(SeedRegistration {
                exam_id,
                student_id,
            });
        }
    }

    /// Raw stored allotments of an exam, in insertion order.
    pub async fn allotments_for(&self, exam_id: ExamId) -> Vec<Allotment> {
        let tables = self.tables.lock().await;
        tables
            .allotments
            .iter()
            .filter(|a| a.exam_id == exam_id)
            .cloned()
            .collect()
    }

    /// Raw stored invigilator bindings of an exam, in insertion order.
    pub async fn invigilators_for(&self, exam_id: ExamId) -> Vec<RoomInvigilator> {
        let tables = self.tables.lock().await;
        tables
            .invigilators
            .iter()
            .filter(|i| i.exam_id == exam_id)
            .cloned()
            .collect()
    }
}

impl Tables {
    /// Checks the constraints the relational schema would enforce, before
    /// anything is mutated.
    fn validate_replacement(
        &self,
        exam_id: ExamId,
        allotments: &[NewAllotment],
        invigilators: &[RoomInvigilator],
    ) -> AppResult<()> {
        if !self.exams.contains_key(&exam_id) {
            return Err(AppError::not_found(format!("Exam with ID {exam_id} not found")));
        }

        let mut students = HashSet::new();
        let mut seats = HashSet::new();
        for allotment in allotments {
            if !self.students.contains_key(&allotment.student_id) {
                return Err(AppError::conflict(format!(
                    "Student {} does not exist",
                    allotment.student_id
                )));
            }
            if !self.rooms.contains_key(&allotment.room_id) {
                return Err(AppError::conflict(format!(
                    "Room {} does not exist",
                    allotment.room_id
                )));
            }
            if allotment.seat_number < 1 {
                return Err(AppError::conflict(format!(
                    "Seat number {} is not positive",
                    allotment.seat_number
                )));
            }
            if !students.insert(&allotment.student_id) {
                return Err(AppError::conflict(format!(
                    "Student {} is allotted twice for exam {exam_id}",
                    allotment.student_id
                )));
            }
            if !seats.insert((allotment.room_id, allotment.seat_number)) {
                return Err(AppError::conflict(format!(
                    "Seat {} in room {} is allotted twice for exam {exam_id}",
                    allotment.seat_number, allotment.room_id
                )));
            }
        }

        let mut bindings = HashSet::new();
        for binding in invigilators {
            if binding.exam_id != exam_id {
                return Err(AppError::conflict(format!(
                    "Invigilator binding belongs to exam {}, not {exam_id}",
                    binding.exam_id
                )));
            }
            if !self.staff.contains_key(&binding.staff_id) {
                return Err(AppError::conflict(format!(
                    "Staff {} does not exist",
                    binding.staff_id
                )));
            }
            if !bindings.insert((binding.room_id, binding.staff_id)) {
                return Err(AppError::conflict(format!(
                    "Staff {} is bound to room {} twice",
                    binding.staff_id, binding.room_id
                )));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl ExamLookup for MemoryDatabase {
    async fn find_exam(&self, exam_id: ExamId) -> AppResult<Option<Exam>> {
        let tables = self.tables.lock().await;
        Ok(tables.exams.get(&exam_id).cloned())
    }

    async fn find_summary(&self, exam_id: ExamId) -> AppResult<Option<ExamSummary>> {
        let tables = self.tables.lock().await;
        Ok(tables.exams.get(&exam_id).and_then(|exam| {
            tables
                .subjects
                .get(&exam.subject_id)
                .map(|subject| ExamSummary::new(exam, subject))
        }))
    }
}

#[async_trait]
impl RoomLookup for MemoryDatabase {
    async fn find_by_ids(&self, room_ids: &[RoomId]) -> AppResult<Vec<Room>> {
        let tables = self.tables.lock().await;
        let wanted: HashSet<&RoomId> = room_ids.iter().collect();
        Ok(tables
            .rooms
            .values()
            .filter(|room| wanted.contains(&room.room_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StaffDirectory for MemoryDatabase {
    async fn list_all(&self) -> AppResult<Vec<Staff>> {
        let tables = self.tables.lock().await;
        Ok(tables.staff.values().cloned().collect())
    }
}

#[async_trait]
impl RegistrationSource for MemoryDatabase {
    async fn find_by_exam(&self, exam_id: ExamId) -> AppResult<Vec<Registration>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .registrations
            .iter()
            .filter(|r| r.exam_id == exam_id)
            .filter_map(|r| tables.students.get(&r.student_id))
            .map(Registration::from)
            .collect())
    }
}

#[async_trait]
impl AllotmentStore for MemoryDatabase {
    async fn replace_for_exam(
        &self,
        exam_id: ExamId,
        allotments: &[NewAllotment],
        invigilators: &[RoomInvigilator],
    ) -> AppResult<u64> {
        let mut tables = self.tables.lock().await;
        tables.validate_replacement(exam_id, allotments, invigilators)?;

        let before = tables.allotments.len();
        tables.allotments.retain(|a| a.exam_id != exam_id);
        tables.invigilators.retain(|i| i.exam_id != exam_id);
        debug!(
            exam_id = %exam_id,
            removed = before - tables.allotments.len(),
            "Cleared previous allotments"
        );

        for allotment in allotments {
            let allotment_id = tables.next_allotment_id.max(1);
            tables.next_allotment_id = allotment_id + 1;
            tables.allotments.push(Allotment {
                allotment_id,
                exam_id,
                student_id: allotment.student_id.clone(),
                room_id: allotment.room_id,
                seat_number: allotment.seat_number,
                assigned_staff_id: allotment.assigned_staff_id,
            });
        }
        tables.invigilators.extend(invigilators.iter().cloned());

        Ok(allotments.len() as u64)
    }

    async fn find_details(&self, exam_id: ExamId) -> AppResult<Vec<AllotmentDetail>> {
        let tables = self.tables.lock().await;
        let mut details = Vec::new();
        for allotment in tables.allotments.iter().filter(|a| a.exam_id == exam_id) {
            let (Some(student), Some(room)) = (
                tables.students.get(&allotment.student_id),
                tables.rooms.get(&allotment.room_id),
            ) else {
                continue;
            };
            let Some(department) = tables.departments.get(&student.department_id) else {
                continue;
            };
            let staff = allotment
                .assigned_staff_id
                .and_then(|id| tables.staff.get(&id));

            details.push(AllotmentDetail {
                allotment_id: allotment.allotment_id,
                student_id: student.student_id.clone(),
                student_name: student.student_name.clone(),
                department_id: department.department_id,
                department_name: department.department_name.clone(),
                room_id: room.room_id,
                room_number: room.room_number.clone(),
                capacity: room.capacity,
                room_type: room.room_type.clone(),
                seat_number: allotment.seat_number,
                assigned_staff_id: staff.map(|s| s.staff_id),
                staff_name: staff.map(|s| s.staff_name.clone()),
                staff_department_id: staff.map(|s| s.department_id),
            });
        }
        details.sort_by_key(|d| (d.room_id, d.seat_number));
        Ok(details)
    }

    async fn find_invigilators(&self, exam_id: ExamId) -> AppResult<Vec<InvigilatorDetail>> {
        let tables = self.tables.lock().await;
        let mut details: Vec<InvigilatorDetail> = tables
            .invigilators
            .iter()
            .filter(|i| i.exam_id == exam_id)
            .filter_map(|i| {
                tables.staff.get(&i.staff_id).map(|staff| InvigilatorDetail {
                    room_id: i.room_id,
                    staff_id: staff.staff_id,
                    staff_name: staff.staff_name.clone(),
                    department_id: staff.department_id,
                })
            })
            .collect();
        // Stable sort keeps binding order within a room.
        details.sort_by_key(|d| d.room_id);
        Ok(details)
    }
}
