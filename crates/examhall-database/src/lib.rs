//! # examhall-database
//!
//! Narrow repository capability traits consumed by the allotment engine,
//! their PostgreSQL implementations, and an in-memory implementation of
//! the same traits.

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod set;
pub mod traits;

pub use connection::DatabasePool;
pub use memory::{MemoryDatabase, SeedData, SeedRegistration};
pub use set::RepositorySet;
pub use traits::{AllotmentStore, ExamLookup, RegistrationSource, RoomLookup, StaffDirectory};
