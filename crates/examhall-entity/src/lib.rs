//! # examhall-entity
//!
//! Domain entity models for ExamHall. Every struct in this crate is a flat
//! value record: a database table row, a joined read row, or a value
//! object produced by the allotment engine. Records reference each other
//! by id only; joins are performed explicitly by the repositories.
//!
//! Wire-facing records serialize with camelCase field names.

pub mod allotment;
pub mod exam;
pub mod room;
pub mod staff;
pub mod student;
