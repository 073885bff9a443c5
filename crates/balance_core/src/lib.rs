//! Core domain logic for the work-life balance planner.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod intent;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use config::{ConfigOverrides, PlannerConfig};
pub use intent::{dispatch, Intent, Notice, NoticeLevel, ResourceFields, TaskFields};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::record_id::RecordId;
pub use model::resource::Resource;
pub use model::task::{parse_calendar_date, Task, TaskKind};
pub use model::validation::{validate_resource_fields, validate_task_fields, ValidationError};
pub use repo::store_repo::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreKey, StoreResult,
};
pub use service::draft::{ResourceDraft, TaskDraft};
pub use service::planner_service::{
    NotFoundError, PersistenceWarning, PlannerService, RecordKind,
};
pub use view::day_view::tasks_for_day;
pub use view::render::{DayTaskRow, RenderState};
