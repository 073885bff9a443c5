//! Persistence adapters.
//!
//! # Responsibility
//! - Define the key-value contract the state container persists through.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Reads never fail loudly: an unreadable key is reported as absent.
//! - Writes report failures to the caller instead of swallowing them.

pub mod store_repo;
