use balance_core::db::{open_db, open_db_in_memory};
use balance_core::{
    KeyValueStore, MemoryKeyValueStore, NotFoundError, PlannerService, RecordId, RecordKind,
    RenderState, SqliteKeyValueStore, StoreError, StoreKey, StoreResult, ValidationError,
};
use chrono::NaiveDate;
use std::cell::{Cell, RefCell};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

/// Memory store that records every save and can be told to refuse writes.
#[derive(Default)]
struct RecordingStore {
    inner: MemoryKeyValueStore,
    saves: RefCell<Vec<(StoreKey, String)>>,
    refuse_writes: Cell<bool>,
}

impl KeyValueStore for RecordingStore {
    fn load(&self, key: StoreKey) -> Option<String> {
        self.inner.load(key)
    }

    fn save(&self, key: StoreKey, blob: &str) -> StoreResult<()> {
        if self.refuse_writes.get() {
            return Err(StoreError::Unavailable("quota exceeded".to_string()));
        }
        self.saves.borrow_mut().push((key, blob.to_string()));
        self.inner.save(key, blob)
    }
}

#[test]
fn add_task_appends_one_record_echoing_inputs() {
    let conn = open_db_in_memory().unwrap();
    let mut service = PlannerService::load(SqliteKeyValueStore::new(&conn), day(5));

    let task = service
        .add_task("  Write report ", day(5), "09:00", "11:00", true)
        .unwrap();

    assert_eq!(service.tasks().len(), 1);
    assert_eq!(task.title, "  Write report ");
    assert_eq!(task.date, day(5));
    assert_eq!(task.from_time, "09:00");
    assert_eq!(task.to_time, "11:00");
    assert!(task.is_work);
    assert_eq!(service.tasks()[0], task);
}

#[test]
fn add_task_rejections_leave_state_and_store_untouched() {
    let store = RecordingStore::default();
    let mut service = PlannerService::load(&store, day(5));

    let empty = service
        .add_task(" \t ", day(5), "09:00", "10:00", true)
        .unwrap_err();
    assert_eq!(empty, ValidationError::EmptyTitle);

    let reversed = service
        .add_task("Review", day(5), "10:00", "09:00", false)
        .unwrap_err();
    assert!(matches!(reversed, ValidationError::InvalidTimeRange { .. }));

    assert!(service.tasks().is_empty());
    assert!(store.saves.borrow().is_empty());
}

#[test]
fn removed_task_never_shows_in_day_view_again() {
    let mut service = PlannerService::load(MemoryKeyValueStore::new(), day(5));
    let keep = service.add_task("Keep", day(5), "08:00", "09:00", true).unwrap();
    let drop_me = service.add_task("Drop", day(5), "10:00", "11:00", false).unwrap();

    service.remove_task(&drop_me.id).unwrap();

    let ids = service
        .day_view()
        .into_iter()
        .map(|task| task.id)
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![keep.id]);
}

#[test]
fn removing_unknown_id_reports_not_found_and_writes_nothing() {
    let store = RecordingStore::default();
    let mut service = PlannerService::load(&store, day(5));
    service.add_task("Only", day(5), "08:00", "09:00", true).unwrap();
    let saves_before = store.saves.borrow().len();

    let err = service.remove_task(&RecordId::from("missing")).unwrap_err();
    assert_eq!(
        err,
        NotFoundError {
            kind: RecordKind::Task,
            id: RecordId::from("missing"),
        }
    );
    assert_eq!(service.tasks().len(), 1);
    assert_eq!(store.saves.borrow().len(), saves_before);
}

#[test]
fn add_resource_accepts_empty_optional_fields_and_rejects_empty_title() {
    let mut service = PlannerService::load(MemoryKeyValueStore::new(), day(5));

    let docs = service.add_resource("Docs", "", "").unwrap();
    assert_eq!(docs.url, "");
    assert_eq!(docs.notes, "");
    assert_eq!(service.resources().len(), 1);

    let err = service
        .add_resource("", "https://example.com", "x")
        .unwrap_err();
    assert_eq!(err, ValidationError::EmptyTitle);
    assert_eq!(service.resources().len(), 1);

    service.remove_resource(&docs.id).unwrap();
    assert!(service.resources().is_empty());
    assert!(service.remove_resource(&docs.id).is_err());
}

#[test]
fn double_toggle_restores_theme_and_persists_each_step() {
    let store = RecordingStore::default();
    let mut service = PlannerService::load(&store, day(5));
    assert!(!service.is_dark());

    assert!(service.toggle_theme());
    assert!(!service.toggle_theme());

    let theme_writes = store
        .saves
        .borrow()
        .iter()
        .filter(|(key, _)| *key == StoreKey::DarkMode)
        .map(|(_, blob)| blob.clone())
        .collect::<Vec<_>>();
    assert_eq!(theme_writes, ["true", "false"]);
}

#[test]
fn selecting_a_date_is_not_persisted() {
    let store = RecordingStore::default();
    let mut service = PlannerService::load(&store, day(5));

    service.set_selected_date(day(9));
    service.clear_selected_date();

    assert!(store.saves.borrow().is_empty());
}

#[test]
fn state_round_trips_through_a_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("balance.sqlite3");

    let (tasks, resources) = {
        let conn = open_db(&path).unwrap();
        let mut service = PlannerService::load(SqliteKeyValueStore::new(&conn), day(5));
        service.add_task("Gym", day(5), "18:00", "19:00", false).unwrap();
        service.add_task("Sprint review", day(6), "14:00", "15:00", true).unwrap();
        service
            .add_resource("Rust book", "https://doc.rust-lang.org/book/", "ch. 10")
            .unwrap();
        service.set_theme(true);
        (service.tasks().to_vec(), service.resources().to_vec())
    };

    let conn = open_db(&path).unwrap();
    let reloaded = PlannerService::load(SqliteKeyValueStore::new(&conn), day(1));
    assert_eq!(reloaded.tasks(), tasks.as_slice());
    assert_eq!(reloaded.resources(), resources.as_slice());
    assert!(reloaded.is_dark());
}

#[test]
fn blobs_with_timestamp_ids_and_date_times_load() {
    let store = MemoryKeyValueStore::new()
        .with_entry(
            StoreKey::Tasks,
            r#"[{"id":"1709625600000","title":"Standup","date":"2024-03-05T08:00:00.000Z",
                "fromTime":"09:00","toTime":"09:15","isWork":true}]"#,
        )
        .with_entry(
            StoreKey::Resources,
            r#"[{"id":"1709625600001","title":"Wiki","url":"","notes":"team"}]"#,
        )
        .with_entry(StoreKey::DarkMode, "true");

    let service = PlannerService::load(store, day(5));
    assert_eq!(service.day_view().len(), 1);
    assert_eq!(service.tasks()[0].id.as_str(), "1709625600000");
    assert_eq!(service.resources()[0].notes, "team");
    assert!(service.is_dark());
}

#[test]
fn corrupted_store_falls_back_to_defaults() {
    let store = MemoryKeyValueStore::new()
        .with_entry(StoreKey::Tasks, "[{")
        .with_entry(StoreKey::Resources, "null")
        .with_entry(StoreKey::DarkMode, "maybe");

    let mut service = PlannerService::load(store, day(5));
    assert!(service.tasks().is_empty());
    assert!(service.resources().is_empty());
    assert!(!service.is_dark());

    service.add_task("Still works", day(5), "09:00", "10:00", true).unwrap();
    let blob = service.store().load(StoreKey::Tasks).unwrap();
    assert!(blob.starts_with('['));
    assert!(blob.contains("Still works"));
}

#[test]
fn failed_saves_keep_memory_state_and_surface_a_warning() {
    let store = RecordingStore::default();
    let mut service = PlannerService::load(&store, day(5));

    store.refuse_writes.set(true);
    let task = service.add_task("Offline", day(5), "09:00", "10:00", true).unwrap();
    assert_eq!(service.tasks(), [task].as_slice());

    let warnings = RenderState::capture(&service).persistence_warnings;
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, StoreKey::Tasks);
    assert!(warnings[0].message.contains("quota exceeded"));

    store.refuse_writes.set(false);
    service.add_task("Online", day(5), "10:00", "11:00", true).unwrap();
    assert!(service.persistence_warnings().is_empty());
    let persisted = store.load(StoreKey::Tasks).unwrap();
    assert!(persisted.contains("Offline"));
    assert!(persisted.contains("Online"));
}
