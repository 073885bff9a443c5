//! Planner state container.
//!
//! # Responsibility
//! - Hold the single in-memory copy of tasks, resources, selection, theme and
//!   form drafts for one running instance.
//! - Persist the affected blob after every mutation of persisted state.
//!
//! # Invariants
//! - Task and resource lists keep insertion order.
//! - A rejected operation leaves state untouched and writes nothing.
//! - Selection and drafts are never persisted.

use crate::model::record_id::RecordId;
use crate::model::resource::Resource;
use crate::model::task::Task;
use crate::model::validation::{validate_resource_fields, validate_task_fields, ValidationError};
use crate::repo::store_repo::{KeyValueStore, StoreKey, StoreResult};
use crate::service::draft::{ResourceDraft, TaskDraft};
use crate::service::snapshot::{encode, load_state};
use crate::view::day_view::tasks_for_day;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Which list a record id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Task,
    Resource,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Resource => "resource",
        }
    }
}

/// Removal targeted an id that is not (or no longer) in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFoundError {
    pub kind: RecordKind,
    pub id: RecordId,
}

impl Display for NotFoundError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} not found: {}", self.kind.as_str(), self.id)
    }
}

impl Error for NotFoundError {}

/// A blob whose latest save failed; cleared by the next successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceWarning {
    pub key: StoreKey,
    pub message: String,
}

/// State container over a key-value store.
pub struct PlannerService<S: KeyValueStore> {
    store: S,
    tasks: Vec<Task>,
    resources: Vec<Resource>,
    is_dark: bool,
    selected_date: Option<NaiveDate>,
    task_draft: TaskDraft,
    resource_draft: ResourceDraft,
    failed_saves: HashMap<StoreKey, String>,
}

impl<S: KeyValueStore> PlannerService<S> {
    /// Loads persisted state from `store`; `today` seeds the selection and
    /// the task draft date.
    ///
    /// Missing or malformed blobs fall back to empty lists and a light theme.
    pub fn load(store: S, today: NaiveDate) -> Self {
        let persisted = load_state(&store);
        info!(
            "event=state_init module=service status=ok tasks={} resources={} is_dark={}",
            persisted.tasks.len(),
            persisted.resources.len(),
            persisted.is_dark
        );

        Self {
            store,
            tasks: persisted.tasks,
            resources: persisted.resources,
            is_dark: persisted.is_dark,
            selected_date: Some(today),
            task_draft: TaskDraft::new(today),
            resource_draft: ResourceDraft::default(),
            failed_saves: HashMap::new(),
        }
    }

    /// Validates and appends a new task, then persists the task list.
    ///
    /// The title is stored as given; only its trimmed form must be non-empty.
    pub fn add_task(
        &mut self,
        title: impl Into<String>,
        date: NaiveDate,
        from_time: impl Into<String>,
        to_time: impl Into<String>,
        is_work: bool,
    ) -> Result<Task, ValidationError> {
        let title = title.into();
        let from_time = from_time.into();
        let to_time = to_time.into();

        if let Err(err) = validate_task_fields(&title, &from_time, &to_time) {
            info!(
                "event=task_add module=service status=rejected reason={}",
                rejection_code(&err)
            );
            return Err(err);
        }

        let task = Task {
            id: RecordId::generate(),
            title,
            date,
            from_time,
            to_time,
            is_work,
        };
        self.tasks.push(task.clone());
        info!(
            "event=task_add module=service status=ok task_id={} count={}",
            task.id,
            self.tasks.len()
        );
        self.persist_tasks();
        Ok(task)
    }

    /// Removes the task with `id` and persists the task list.
    ///
    /// An absent id reports `NotFoundError` and writes nothing.
    pub fn remove_task(&mut self, id: &RecordId) -> Result<(), NotFoundError> {
        let before = self.tasks.len();
        self.tasks.retain(|task| &task.id != id);
        if self.tasks.len() == before {
            debug!("event=task_remove module=service status=not_found task_id={id}");
            return Err(NotFoundError {
                kind: RecordKind::Task,
                id: id.clone(),
            });
        }

        info!(
            "event=task_remove module=service status=ok task_id={id} count={}",
            self.tasks.len()
        );
        self.persist_tasks();
        Ok(())
    }

    /// Validates and appends a new resource, then persists the resource list.
    pub fn add_resource(
        &mut self,
        title: impl Into<String>,
        url: impl Into<String>,
        notes: impl Into<String>,
    ) -> Result<Resource, ValidationError> {
        let title = title.into();
        if let Err(err) = validate_resource_fields(&title) {
            info!(
                "event=resource_add module=service status=rejected reason={}",
                rejection_code(&err)
            );
            return Err(err);
        }

        let resource = Resource {
            id: RecordId::generate(),
            title,
            url: url.into(),
            notes: notes.into(),
        };
        self.resources.push(resource.clone());
        info!(
            "event=resource_add module=service status=ok resource_id={} count={}",
            resource.id,
            self.resources.len()
        );
        self.persist_resources();
        Ok(resource)
    }

    /// Removes the resource with `id` and persists the resource list.
    pub fn remove_resource(&mut self, id: &RecordId) -> Result<(), NotFoundError> {
        let before = self.resources.len();
        self.resources.retain(|resource| &resource.id != id);
        if self.resources.len() == before {
            debug!("event=resource_remove module=service status=not_found resource_id={id}");
            return Err(NotFoundError {
                kind: RecordKind::Resource,
                id: id.clone(),
            });
        }

        info!(
            "event=resource_remove module=service status=ok resource_id={id} count={}",
            self.resources.len()
        );
        self.persist_resources();
        Ok(())
    }

    /// Changes the day shown by the day view. Not persisted.
    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
    }

    /// Deselects the calendar; the day view becomes empty.
    pub fn clear_selected_date(&mut self) {
        self.selected_date = None;
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Records the theme flag and persists it.
    pub fn set_theme(&mut self, is_dark: bool) {
        self.is_dark = is_dark;
        info!("event=theme_set module=service status=ok is_dark={is_dark}");
        self.persist_theme();
    }

    /// Flips the theme flag, persists it, and returns the new value.
    pub fn toggle_theme(&mut self) -> bool {
        self.set_theme(!self.is_dark);
        self.is_dark
    }

    pub fn is_dark(&self) -> bool {
        self.is_dark
    }

    /// All tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// All resources in insertion order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Tasks on the selected day ordered by start time; empty without a
    /// selection.
    pub fn day_view(&self) -> Vec<Task> {
        match self.selected_date {
            Some(date) => tasks_for_day(&self.tasks, date),
            None => Vec::new(),
        }
    }

    pub fn task_draft(&self) -> &TaskDraft {
        &self.task_draft
    }

    pub fn task_draft_mut(&mut self) -> &mut TaskDraft {
        &mut self.task_draft
    }

    pub fn resource_draft(&self) -> &ResourceDraft {
        &self.resource_draft
    }

    pub fn resource_draft_mut(&mut self) -> &mut ResourceDraft {
        &mut self.resource_draft
    }

    /// Submits the task form. On success only the title is cleared so the
    /// next entry keeps the same date, times and kind.
    pub fn submit_task_draft(&mut self) -> Result<Task, ValidationError> {
        let draft = self.task_draft.clone();
        let task = self.add_task(
            draft.title,
            draft.date,
            draft.from_time,
            draft.to_time,
            draft.kind.is_work(),
        )?;
        self.task_draft.title.clear();
        Ok(task)
    }

    /// Submits the resource form and clears it on success.
    pub fn submit_resource_draft(&mut self) -> Result<Resource, ValidationError> {
        let draft = self.resource_draft.clone();
        let resource = self.add_resource(draft.title, draft.url, draft.notes)?;
        self.resource_draft.clear();
        Ok(resource)
    }

    /// Blobs whose most recent save failed, in store key order.
    pub fn persistence_warnings(&self) -> Vec<PersistenceWarning> {
        StoreKey::ALL
            .iter()
            .filter_map(|key| {
                self.failed_saves.get(key).map(|message| PersistenceWarning {
                    key: *key,
                    message: message.clone(),
                })
            })
            .collect()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist_tasks(&mut self) {
        let blob = encode(StoreKey::Tasks, &self.tasks);
        self.write(StoreKey::Tasks, blob);
    }

    fn persist_resources(&mut self) {
        let blob = encode(StoreKey::Resources, &self.resources);
        self.write(StoreKey::Resources, blob);
    }

    fn persist_theme(&mut self) {
        let blob = encode(StoreKey::DarkMode, &self.is_dark);
        self.write(StoreKey::DarkMode, blob);
    }

    fn write(&mut self, key: StoreKey, blob: StoreResult<String>) {
        match blob.and_then(|blob| self.store.save(key, &blob)) {
            Ok(()) => {
                self.failed_saves.remove(&key);
            }
            Err(err) => {
                warn!(
                    "event=state_persist module=service status=error key={key} error_code=store_write_failed error={err}"
                );
                self.failed_saves.insert(key, err.to_string());
            }
        }
    }
}

fn rejection_code(err: &ValidationError) -> &'static str {
    match err {
        ValidationError::EmptyTitle => "empty_title",
        ValidationError::InvalidTimeRange { .. } => "invalid_time_range",
    }
}
