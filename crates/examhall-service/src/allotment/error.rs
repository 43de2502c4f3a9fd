//! Business failures of the allotment engine.

use thiserror::Error;

use examhall_core::error::{AppError, ErrorKind};
use examhall_core::types::ExamId;

/// Why an allotment could not be generated or read.
///
/// Every variant aborts the whole operation; none are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllotmentError {
    /// The exam id does not resolve.
    #[error("Exam with ID {0} not found")]
    ExamNotFound(ExamId),
    /// None of the requested room ids resolve.
    #[error("No valid rooms found")]
    NoValidRooms,
    /// Nobody is registered for the exam.
    #[error("No students registered for exam {0}")]
    NotRegistered(ExamId),
    /// More registrants than seats in the selected rooms.
    #[error("Insufficient room capacity for all students: {required} registered, {available} seats")]
    InsufficientCapacity {
        /// Registered students.
        required: usize,
        /// Seats across the resolved rooms.
        available: usize,
    },
    /// The staff directory is empty.
    #[error("No staff available for invigilation")]
    NoStaffAvailable,
    /// Nothing has been generated for the exam yet.
    #[error("No allotments found for exam ID {0}")]
    NoAllotments(ExamId),
}

impl AllotmentError {
    /// Stable machine-readable code.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::ExamNotFound(_) => "EXAM_NOT_FOUND",
            Self::NoValidRooms => "NO_VALID_ROOMS",
            Self::NotRegistered(_) => "NOT_REGISTERED",
            Self::InsufficientCapacity { .. } => "INSUFFICIENT_CAPACITY",
            Self::NoStaffAvailable => "NO_STAFF_AVAILABLE",
            Self::NoAllotments(_) => "NO_ALLOTMENTS",
        }
    }

    /// Coarse error category used for transport mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ExamNotFound(_) | Self::NoAllotments(_) => ErrorKind::NotFound,
            Self::NoValidRooms
            | Self::NotRegistered(_)
            | Self::InsufficientCapacity { .. }
            | Self::NoStaffAvailable => ErrorKind::Validation,
        }
    }
}

impl From<AllotmentError> for AppError {
    fn from(err: AllotmentError) -> Self {
        AppError::new(err.kind(), err.to_string()).with_reason(err.reason())
    }
}
