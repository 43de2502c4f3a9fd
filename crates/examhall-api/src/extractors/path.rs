//! Typed path parameter helpers.

use examhall_core::error::AppError;
use examhall_core::types::ExamId;

/// Parses an exam id from a path segment.
pub fn parse_exam_id(s: &str) -> Result<ExamId, AppError> {
    s.parse()
        .map_err(|_| AppError::validation(format!("Invalid exam ID: {s}")))
}
