//! Response DTOs.

use serde::{Deserialize, Serialize};

use examhall_service::GenerateOutcome;

/// Body returned after a successful generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateAllotmentResponse {
    /// Confirmation message.
    pub message: String,
    /// Number of allotment rows written.
    pub allotments: u64,
}

impl From<GenerateOutcome> for GenerateAllotmentResponse {
    fn from(outcome: GenerateOutcome) -> Self {
        Self {
            message: outcome.message,
            allotments: outcome.allotments,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database does not answer.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Active storage backend.
    pub storage: String,
    /// Database connectivity: `connected`, `unreachable` or `unused`.
    pub database: String,
}
