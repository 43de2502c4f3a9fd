//! # examhall-service
//!
//! The exam seating allotment engine. [`AllotmentService`] orchestrates
//! the repositories and the pure assignment components to implement the
//! two use cases: generating an allotment for an exam and reading it back
//! grouped by room.
//!
//! Services follow constructor injection; all repositories are provided
//! at construction time via `Arc` references.

pub mod allotment;

pub use allotment::{
    AllotmentError, AllotmentQuery, AllotmentService, ExamAllotmentView, GenerateOutcome,
    GenerateRequest, InvigilatorBinder, RoomCapacityPlanner, SeatAssigner,
};
