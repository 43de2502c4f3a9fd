//! Bundles one implementation of every repository capability.

use std::sync::Arc;

use sqlx::PgPool;

use crate::memory::MemoryDatabase;
use crate::repositories::{
    AllotmentRepository, ExamRepository, RegistrationRepository, RoomRepository, StaffRepository,
};
use crate::traits::{AllotmentStore, ExamLookup, RegistrationSource, RoomLookup, StaffDirectory};

/// The repositories the allotment engine reads from and writes to.
#[derive(Clone)]
pub struct RepositorySet {
    /// Exam lookups.
    pub exams: Arc<dyn ExamLookup>,
    /// Room lookups.
    pub rooms: Arc<dyn RoomLookup>,
    /// Staff directory.
    pub staff: Arc<dyn StaffDirectory>,
    /// Exam registrations.
    pub registrations: Arc<dyn RegistrationSource>,
    /// Allotment persistence.
    pub allotments: Arc<dyn AllotmentStore>,
}

impl RepositorySet {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            exams: Arc::new(ExamRepository::new(pool.clone())),
            rooms: Arc::new(RoomRepository::new(pool.clone())),
            staff: Arc::new(StaffRepository::new(pool.clone())),
            registrations: Arc::new(RegistrationRepository::new(pool.clone())),
            allotments: Arc::new(AllotmentRepository::new(pool)),
        }
    }

    /// Every capability served by the same in-memory database.
    pub fn memory(db: MemoryDatabase) -> Self {
        let db = Arc::new(db);
        Self {
            exams: db.clone(),
            rooms: db.clone(),
            staff: db.clone(),
            registrations: db.clone(),
            allotments: db,
        }
    }
}

impl std::fmt::Debug for RepositorySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepositorySet").finish_non_exhaustive()
    }
}
