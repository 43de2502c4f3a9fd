//! Core type definitions used across the ExamHall workspace.

pub mod id;

pub use id::*;
