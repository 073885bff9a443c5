//! Plain render-state snapshot consumed by front ends.
//!
//! Front ends draw from this value only; they never read the service
//! directly, which keeps rendering a pure function of state.

use crate::model::record_id::RecordId;
use crate::model::resource::Resource;
use crate::repo::store_repo::KeyValueStore;
use crate::service::planner_service::{PersistenceWarning, PlannerService};
use chrono::NaiveDate;

pub const NO_SELECTION_HEADING: &str = "Select a date";
pub const EMPTY_DAY_MESSAGE: &str = "No tasks for this day";

/// One line of the day view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayTaskRow {
    pub id: RecordId,
    pub title: String,
    /// `HH:MM - HH:MM`.
    pub span: String,
    /// `Work` or `Personal`.
    pub kind_label: &'static str,
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    pub heading: String,
    pub selected_date: Option<NaiveDate>,
    pub day_tasks: Vec<DayTaskRow>,
    /// Set only when a date is selected and it has no tasks.
    pub empty_day_message: Option<&'static str>,
    pub resources: Vec<Resource>,
    pub is_dark: bool,
    pub persistence_warnings: Vec<PersistenceWarning>,
}

impl RenderState {
    pub fn capture<S: KeyValueStore>(service: &PlannerService<S>) -> Self {
        let selected_date = service.selected_date();
        let day_tasks = service
            .day_view()
            .into_iter()
            .map(|task| DayTaskRow {
                span: task.time_span(),
                kind_label: task.kind().label(),
                id: task.id,
                title: task.title,
            })
            .collect::<Vec<_>>();

        let empty_day_message = match selected_date {
            Some(_) if day_tasks.is_empty() => Some(EMPTY_DAY_MESSAGE),
            _ => None,
        };

        Self {
            heading: selected_date.map_or_else(|| NO_SELECTION_HEADING.to_string(), day_heading),
            selected_date,
            day_tasks,
            empty_day_message,
            resources: service.resources().to_vec(),
            is_dark: service.is_dark(),
            persistence_warnings: service.persistence_warnings(),
        }
    }
}

/// Formats a day heading such as `Tue Mar 05 2024`.
pub fn day_heading(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}
