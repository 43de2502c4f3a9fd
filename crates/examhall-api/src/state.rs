//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use examhall_core::config::AppConfig;
use examhall_database::{DatabasePool, RepositorySet};
use examhall_service::AllotmentService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Seat allotment engine
    pub allotment_service: Arc<AllotmentService>,
    /// PostgreSQL pool, absent on the memory backend
    pub database: Option<DatabasePool>,
}

impl AppState {
    /// Builds the state and the services over the given repositories.
    pub fn new(config: AppConfig, repos: RepositorySet, database: Option<DatabasePool>) -> Self {
        let allotment_service = AllotmentService::new(repos, &config.allotment);
        Self {
            config: Arc::new(config),
            allotment_service: Arc::new(allotment_service),
            database,
        }
    }
}
