//! Pending form fields for the task and resource entry forms.

use crate::model::task::TaskKind;
use chrono::NaiveDate;

pub const DEFAULT_FROM_TIME: &str = "09:00";
pub const DEFAULT_TO_TIME: &str = "17:00";

/// In-progress task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub date: NaiveDate,
    pub from_time: String,
    pub to_time: String,
    pub kind: TaskKind,
}

impl TaskDraft {
    /// Empty draft on `date` spanning the default working hours.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            title: String::new(),
            date,
            from_time: DEFAULT_FROM_TIME.to_string(),
            to_time: DEFAULT_TO_TIME.to_string(),
            kind: TaskKind::Work,
        }
    }
}

/// In-progress resource form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceDraft {
    pub title: String,
    pub url: String,
    pub notes: String,
}

impl ResourceDraft {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
