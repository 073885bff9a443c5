//! Day-view projection.
//!
//! # Invariants
//! - Only tasks whose calendar date equals the selection are kept.
//! - Order is ascending `from_time`; ties keep insertion order.

use crate::model::task::Task;
use chrono::NaiveDate;

/// Returns the tasks scheduled on `date`, earliest start first.
///
/// Produces a fresh vector on every call; `tasks` is left untouched.
pub fn tasks_for_day(tasks: &[Task], date: NaiveDate) -> Vec<Task> {
    let mut day = tasks
        .iter()
        .filter(|task| task.date == date)
        .cloned()
        .collect::<Vec<_>>();
    // `sort_by` is stable, which keeps same-start tasks in insertion order.
    day.sort_by(|left, right| left.from_time.cmp(&right.from_time));
    day
}
