//! Convenience result type alias for ExamHall.

use crate::error::AppError;

/// A specialized `Result` type for ExamHall operations.
pub type AppResult<T> = Result<T, AppError>;
