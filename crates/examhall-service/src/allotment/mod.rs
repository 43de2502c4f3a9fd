//! Seat allotment for exams.

pub mod assigner;
pub mod capacity;
pub mod error;
pub mod invigilator;
pub mod lock;
pub mod query;
pub mod registration;
pub mod service;

pub use assigner::{Assignment, SeatAssigner};
pub use capacity::{RoomCapacityPlanner, RoomPlan};
pub use error::AllotmentError;
pub use invigilator::InvigilatorBinder;
pub use lock::{ExamLockGuard, ExamLocks};
pub use query::{AllotmentEntry, AllotmentQuery, ExamAllotmentView, RoomAllotmentGroup};
pub use registration::RegistrationReader;
pub use service::{AllotmentService, GenerateOutcome, GenerateRequest};
