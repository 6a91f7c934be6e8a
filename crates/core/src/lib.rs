//! Domain model and rules for the classroom service.
//!
//! Everything here is storage-agnostic: access decisions, course codes,
//! membership rules and grade aggregation operate on plain values.

pub mod domain;
