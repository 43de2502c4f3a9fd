//! Allotment orchestration: generate and read back.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use examhall_core::config::AllotmentConfig;
use examhall_core::error::AppError;
use examhall_core::types::{ExamId, RoomId, StaffId};
use examhall_database::RepositorySet;
use examhall_database::traits::{AllotmentStore, ExamLookup, StaffDirectory};
use examhall_entity::allotment::{NewAllotment, RoomInvigilator};

use super::assigner::SeatAssigner;
use super::capacity::RoomCapacityPlanner;
use super::error::AllotmentError;
use super::invigilator::InvigilatorBinder;
use super::lock::ExamLocks;
use super::query::{AllotmentQuery, ExamAllotmentView};
use super::registration::RegistrationReader;

/// Input of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Exam to seat.
    pub exam_id: ExamId,
    /// Candidate rooms, filled in this order.
    pub room_ids: Vec<RoomId>,
    /// Requested invigilators per room. The first bound id of a room
    /// becomes its lead invigilator.
    #[serde(default)]
    pub staff_assignments: HashMap<RoomId, Vec<StaffId>>,
}

/// Result of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateOutcome {
    /// Human-readable confirmation.
    pub message: String,
    /// Allotment rows written.
    pub allotments: u64,
}

impl GenerateOutcome {
    fn generated(allotments: u64) -> Self {
        Self {
            message: "Allotment generated successfully".to_string(),
            allotments,
        }
    }
}

/// Generates and reads exam seat allotments.
pub struct AllotmentService {
    exams: Arc<dyn ExamLookup>,
    staff: Arc<dyn StaffDirectory>,
    store: Arc<dyn AllotmentStore>,
    registrations: RegistrationReader,
    planner: RoomCapacityPlanner,
    query: AllotmentQuery,
    assigner: SeatAssigner,
    locks: ExamLocks,
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for AllotmentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllotmentService")
            .field("assigner", &self.assigner)
            .finish_non_exhaustive()
    }
}

impl AllotmentService {
    /// Creates the service. Shuffles are reproducible when the config
    /// carries a seed, otherwise the generator is seeded from the OS.
    pub fn new(repos: RepositorySet, config: &AllotmentConfig) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(repos, SeatAssigner::new(config.lookahead_window), rng)
    }

    /// Creates the service with an explicit assigner and random source.
    pub fn with_rng(repos: RepositorySet, assigner: SeatAssigner, rng: StdRng) -> Self {
        Self {
            registrations: RegistrationReader::new(repos.registrations),
            planner: RoomCapacityPlanner::new(repos.rooms),
            query: AllotmentQuery::new(repos.exams.clone(), repos.allotments.clone()),
            exams: repos.exams,
            staff: repos.staff,
            store: repos.allotments,
            assigner,
            locks: ExamLocks::new(),
            rng: Mutex::new(rng),
        }
    }

    /// Seats every registrant of the exam and replaces its stored
    /// allotment and invigilator bindings.
    ///
    /// All preconditions are checked before anything is written. Runs for
    /// the same exam are serialized.
    pub async fn generate(&self, request: GenerateRequest) -> Result<GenerateOutcome, AppError> {
        let exam_id = request.exam_id;
        let _guard = self.locks.acquire(exam_id).await;

        info!(
            exam_id = %exam_id,
            rooms = request.room_ids.len(),
            "Generating allotment"
        );

        self.exams
            .find_exam(exam_id)
            .await?
            .ok_or(AllotmentError::ExamNotFound(exam_id))?;

        let plan = self.planner.resolve(&request.room_ids).await?;
        let registrations = self.registrations.load(exam_id).await?;
        plan.ensure_capacity(registrations.len())?;

        let binder = InvigilatorBinder::new(self.staff.list_all().await?)?;

        let assignment = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| AppError::internal("Shuffle source lock poisoned"))?;
            self.assigner.assign(&registrations, &plan.rooms, &mut *rng)
        };
        if assignment.unresolved_clashes > 0 {
            debug!(
                exam_id = %exam_id,
                clashes = assignment.unresolved_clashes,
                "Some same-department neighbours could not be separated"
            );
        }

        let mut invigilators = Vec::new();
        let mut leads: HashMap<RoomId, StaffId> = HashMap::new();
        for room in &plan.rooms {
            let bound = binder.bind(
                request
                    .staff_assignments
                    .get(&room.room_id)
                    .map(Vec::as_slice),
            );
            if let Some(lead) = bound.first() {
                leads.insert(room.room_id, *lead);
            }
            invigilators.extend(bound.into_iter().map(|staff_id| RoomInvigilator {
                exam_id,
                room_id: room.room_id,
                staff_id,
            }));
        }

        let ignored = request
            .staff_assignments
            .keys()
            .filter(|room_id| !plan.rooms.iter().any(|r| r.room_id == **room_id))
            .count();
        if ignored > 0 {
            warn!(
                exam_id = %exam_id,
                ignored,
                "Staff requested for rooms outside the selection were ignored"
            );
        }

        let allotments: Vec<NewAllotment> = assignment
            .seats
            .into_iter()
            .map(|seat| {
                let lead = leads.get(&seat.room_id).copied();
                NewAllotment::from_seat(seat, lead)
            })
            .collect();

        let written = self
            .store
            .replace_for_exam(exam_id, &allotments, &invigilators)
            .await?;

        info!(
            exam_id = %exam_id,
            allotments = written,
            invigilators = invigilators.len(),
            "Allotment generated"
        );

        Ok(GenerateOutcome::generated(written))
    }

    /// The stored allotment of an exam, grouped by room.
    pub async fn find_by_exam(&self, exam_id: ExamId) -> Result<ExamAllotmentView, AppError> {
        self.query.find_by_exam(exam_id).await
    }
}
