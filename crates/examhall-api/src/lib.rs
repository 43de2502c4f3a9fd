//! # examhall-api
//!
//! HTTP API layer for ExamHall built on Axum.
//!
//! Exposes the allotment endpoints and a health check, with request
//! logging, CORS, extractors, DTOs, and the mapping from [`AppError`]
//! kinds to HTTP status codes.
//!
//! [`AppError`]: examhall_core::error::AppError

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
