//! Loads the students registered for an exam.

use std::sync::Arc;

use tracing::debug;

use examhall_core::error::AppError;
use examhall_core::types::ExamId;
use examhall_database::traits::RegistrationSource;
use examhall_entity::student::Registration;

use super::error::AllotmentError;

/// Reads the registration list the engine seats.
#[derive(Clone)]
pub struct RegistrationReader {
    source: Arc<dyn RegistrationSource>,
}

impl RegistrationReader {
    /// Creates a reader over a registration source.
    pub fn new(source: Arc<dyn RegistrationSource>) -> Self {
        Self { source }
    }

    /// Registrations of the exam, in registration order.
    ///
    /// An empty list is a precondition failure for the whole run.
    pub async fn load(&self, exam_id: ExamId) -> Result<Vec<Registration>, AppError> {
        let registrations = self.source.find_by_exam(exam_id).await?;
        if registrations.is_empty() {
            return Err(AllotmentError::NotRegistered(exam_id).into());
        }

        debug!(exam_id = %exam_id, count = registrations.len(), "Loaded exam registrations");
        Ok(registrations)
    }
}
