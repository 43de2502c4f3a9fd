//! Repository capability traits consumed by the allotment engine.
//!
//! Each trait is one narrow capability ("find rooms by ids", "list the
//! staff directory", ...) rather than a generic CRUD surface, so the
//! engine depends only on what it reads and writes. Two implementations
//! are provided:
//! - PostgreSQL (see [`crate::repositories`])
//! - In-memory (see [`crate::memory`])

use async_trait::async_trait;

use examhall_core::result::AppResult;
use examhall_core::types::{ExamId, RoomId};
use examhall_entity::allotment::{AllotmentDetail, InvigilatorDetail, NewAllotment, RoomInvigilator};
use examhall_entity::exam::{Exam, ExamSummary};
use examhall_entity::room::Room;
use examhall_entity::staff::Staff;
use examhall_entity::student::Registration;

/// Exam lookups.
#[async_trait]
pub trait ExamLookup: Send + Sync + 'static {
    /// Find an exam by id.
    async fn find_exam(&self, exam_id: ExamId) -> AppResult<Option<Exam>>;

    /// Find an exam joined with its subject.
    async fn find_summary(&self, exam_id: ExamId) -> AppResult<Option<ExamSummary>>;
}

/// Room lookups.
#[async_trait]
pub trait RoomLookup: Send + Sync + 'static {
    /// Resolve the given ids. Unknown ids are silently skipped and the
    /// result order is unspecified.
    async fn find_by_ids(&self, room_ids: &[RoomId]) -> AppResult<Vec<Room>>;
}

/// The staff directory.
#[async_trait]
pub trait StaffDirectory: Send + Sync + 'static {
    /// List every staff member.
    async fn list_all(&self) -> AppResult<Vec<Staff>>;
}

/// Exam registrations.
#[async_trait]
pub trait RegistrationSource: Send + Sync + 'static {
    /// Students registered for an exam with their departments, in
    /// registration order.
    async fn find_by_exam(&self, exam_id: ExamId) -> AppResult<Vec<Registration>>;
}

/// Allotment persistence.
///
/// Implementations must make [`AllotmentStore::replace_for_exam`] atomic:
/// either the previous allotment and invigilator rows for the exam are
/// fully replaced, or they are left untouched.
#[async_trait]
pub trait AllotmentStore: Send + Sync + 'static {
    /// Delete every allotment and invigilator row of the exam, then insert
    /// the given rows. Returns the number of allotments written.
    async fn replace_for_exam(
        &self,
        exam_id: ExamId,
        allotments: &[NewAllotment],
        invigilators: &[RoomInvigilator],
    ) -> AppResult<u64>;

    /// Stored allotments of an exam joined for display, ordered by room id
    /// then seat number.
    async fn find_details(&self, exam_id: ExamId) -> AppResult<Vec<AllotmentDetail>>;

    /// Invigilator bindings of an exam joined with staff records, ordered
    /// by room id, then in the order they were bound.
    async fn find_invigilators(&self, exam_id: ExamId) -> AppResult<Vec<InvigilatorDetail>>;
}
