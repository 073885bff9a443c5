//! Read-only projections of planner state for the presentation layer.

pub mod day_view;
pub mod render;
