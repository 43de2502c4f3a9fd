//! Route handlers organized by domain.

pub mod allotment;
pub mod health;
