//! User intents and the transient notices they produce.
//!
//! # Responsibility
//! - Translate one user action into state-container calls.
//! - Map every outcome to a user-facing notice; nothing here panics.
//!
//! # Invariants
//! - Removing an already-absent record is an idempotent no-op, never an error.
//! - Exactly one notice per intent, except date selection which is silent.

use crate::model::record_id::RecordId;
use crate::model::validation::ValidationError;
use crate::repo::store_repo::KeyValueStore;
use crate::service::planner_service::{NotFoundError, PlannerService, RecordKind};
use chrono::NaiveDate;
use log::debug;

/// Task form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub date: NaiveDate,
    pub from_time: String,
    pub to_time: String,
    pub is_work: bool,
}

/// Resource form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFields {
    pub title: String,
    pub url: String,
    pub notes: String,
}

/// One discrete user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// `None` deselects the calendar.
    SelectDate(Option<NaiveDate>),
    SubmitTask(TaskFields),
    RemoveTask(RecordId),
    SubmitResource(ResourceFields),
    RemoveResource(RecordId),
    SetTheme(bool),
    ToggleTheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Toast-style feedback for one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub description: String,
    /// Id of the record created by the intent, if any.
    pub record_id: Option<RecordId>,
}

impl Notice {
    fn success(description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            title: "Success",
            description: description.into(),
            record_id: None,
        }
    }

    fn created(description: impl Into<String>, record_id: RecordId) -> Self {
        Self {
            record_id: Some(record_id),
            ..Self::success(description)
        }
    }

    fn info(description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: "Info",
            description: description.into(),
            record_id: None,
        }
    }

    fn error(description: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error",
            description: description.into(),
            record_id: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Applies `intent` to `service`.
///
/// Returns `None` only for date selection, which has no feedback.
pub fn dispatch<S: KeyValueStore>(
    service: &mut PlannerService<S>,
    intent: Intent,
) -> Option<Notice> {
    let notice = match intent {
        Intent::SelectDate(Some(date)) => {
            service.set_selected_date(date);
            return None;
        }
        Intent::SelectDate(None) => {
            service.clear_selected_date();
            return None;
        }
        Intent::SubmitTask(fields) => match service.add_task(
            fields.title,
            fields.date,
            fields.from_time,
            fields.to_time,
            fields.is_work,
        ) {
            Ok(task) => Notice::created("Task added successfully", task.id),
            Err(err) => Notice::error(task_rejection(&err)),
        },
        Intent::RemoveTask(id) => match service.remove_task(&id) {
            Ok(()) => Notice::success("Task removed successfully"),
            Err(err) => already_removed(&err),
        },
        Intent::SubmitResource(fields) => {
            match service.add_resource(fields.title, fields.url, fields.notes) {
                Ok(resource) => Notice::created("Resource added successfully", resource.id),
                Err(_) => Notice::error("Resource title cannot be empty"),
            }
        }
        Intent::RemoveResource(id) => match service.remove_resource(&id) {
            Ok(()) => Notice::success("Resource removed successfully"),
            Err(err) => already_removed(&err),
        },
        Intent::SetTheme(is_dark) => {
            service.set_theme(is_dark);
            Notice::success(theme_description(is_dark))
        }
        Intent::ToggleTheme => {
            let is_dark = service.toggle_theme();
            Notice::success(theme_description(is_dark))
        }
    };
    Some(notice)
}

fn task_rejection(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::EmptyTitle => "Task title cannot be empty",
        ValidationError::InvalidTimeRange { .. } => "Start time must be before end time",
    }
}

fn already_removed(err: &NotFoundError) -> Notice {
    debug!(
        "event=intent_remove module=intent status=noop kind={} id={}",
        err.kind.as_str(),
        err.id
    );
    let noun = match err.kind {
        RecordKind::Task => "Task",
        RecordKind::Resource => "Resource",
    };
    Notice::info(format!("{noun} was already removed"))
}

fn theme_description(is_dark: bool) -> &'static str {
    if is_dark {
        "Dark mode enabled"
    } else {
        "Light mode enabled"
    }
}
