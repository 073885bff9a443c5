//! Application state container and its persistence glue.
//!
//! # Responsibility
//! - Own the in-memory task/resource lists, selection, theme and form drafts.
//! - Route every mutation through named operations that persist eagerly.
//!
//! # Invariants
//! - No operation fails because persistence failed; the in-memory state
//!   stays authoritative and the failure is surfaced as a warning.

pub mod draft;
pub mod planner_service;
mod snapshot;
