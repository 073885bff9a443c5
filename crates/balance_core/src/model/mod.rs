//! Domain records for the planner.
//!
//! # Responsibility
//! - Define the task and resource records and their persisted shape.
//! - Provide the pure form validators that gate record creation.
//!
//! # Invariants
//! - Records are immutable after creation; only whole-record removal exists.
//! - Every record carries a `RecordId` that is unique within its list.

pub mod record_id;
pub mod resource;
pub mod task;
pub mod validation;
