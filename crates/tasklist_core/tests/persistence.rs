use chrono::NaiveDate;
use tasklist_core::db::DbError;
use tasklist_core::{
    AddOutcome, KvRepository, ManualClock, MemoryKvRepository, SqliteKvRepository, StoreError,
    StoreResult, Task, TaskListConfig, TaskListRepository, TaskService, TaskServiceError,
    TextSurface, Theme,
};

/// Store that reads fine but rejects every write, like a read-only database.
struct ReadOnlyKv;

impl KvRepository for ReadOnlyKv {
    fn get(&self, _key: &str) -> StoreResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> StoreResult<()> {
        Err(StoreError::Db(DbError::Sqlite(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_READONLY),
            Some("attempt to write a readonly database".to_string()),
        ))))
    }
}

fn open_memory(kv: MemoryKvRepository) -> TaskService<MemoryKvRepository> {
    TaskService::open(
        kv,
        TaskListConfig::default(),
        Box::new(ManualClock::new(1_760_000_000_000)),
    )
}

#[test]
fn reload_reproduces_identical_list() {
    let kv = MemoryKvRepository::new();
    let mut service = open_memory(kv.clone());
    let due = NaiveDate::from_ymd_opt(2026, 11, 2);
    service.add("Pay rent", due).unwrap();
    let AddOutcome::Added(milk) = service.add("Buy milk", None).unwrap() else {
        panic!("add failed");
    };
    service.add("Call mom", None).unwrap();
    service.toggle(milk, true).unwrap();
    service.reorder(2, 0).unwrap();
    let before = service.tasks().to_vec();

    let reloaded = open_memory(kv);

    assert_eq!(reloaded.tasks(), before.as_slice());
}

#[test]
fn stored_text_round_trips_exactly() {
    let stored = r#"[{"id":1700000000001,"title":"Buy milk","done":true},{"id":1700000000002,"title":"Pay rent","done":false,"dueDate":"2026-11-02"}]"#;
    let kv = MemoryKvRepository::with_entries([("tasks", stored)]);
    let repo = TaskListRepository::new(kv.clone(), &TaskListConfig::default());

    let tasks = repo.load_tasks().unwrap();
    repo.save_tasks(&tasks).unwrap();

    assert_eq!(kv.get("tasks").unwrap().as_deref(), Some(stored));
}

#[test]
fn wire_fields_use_expected_names() {
    let task = Task::new(
        1_700_000_000_000,
        "Pay rent",
        NaiveDate::from_ymd_opt(2026, 1, 5),
    )
    .unwrap();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], 1_700_000_000_000_i64);
    assert_eq!(json["title"], "Pay rent");
    assert_eq!(json["done"], false);
    assert_eq!(json["dueDate"], "2026-01-05");

    let undated = Task::new(1, "x", None).unwrap();
    let json = serde_json::to_value(&undated).unwrap();
    assert!(json.get("dueDate").is_none());
}

#[test]
fn corrupt_stored_list_starts_empty() {
    let kv = MemoryKvRepository::with_entries([("tasks", "[{\"id\": oops")]);
    let mut service = open_memory(kv.clone());

    assert!(service.tasks().is_empty());

    // The widget keeps working and overwrites the bad value on next save.
    service.add("Fresh start", None).unwrap();
    let reloaded = open_memory(kv);
    assert_eq!(reloaded.tasks().len(), 1);
}

#[test]
fn invalid_record_is_treated_as_corrupt_state() {
    let kv = MemoryKvRepository::with_entries([(
        "tasks",
        r#"[{"id":1,"title":"ok","done":false},{"id":2,"title":"   ","done":false}]"#,
    )]);
    let service = open_memory(kv);
    assert!(service.tasks().is_empty());
}

#[test]
fn legacy_records_without_due_date_load() {
    let kv = MemoryKvRepository::with_entries([(
        "tasks",
        r#"[{"id":1700000000000,"title":"Legacy","done":false}]"#,
    )]);
    let service = open_memory(kv);
    assert_eq!(service.tasks().len(), 1);
    assert_eq!(service.tasks()[0].due_date, None);
}

#[test]
fn theme_preference_is_persisted() {
    let kv = MemoryKvRepository::new();
    let mut service = open_memory(kv.clone());
    assert_eq!(service.theme(), Theme::Dark);

    assert_eq!(service.toggle_theme().unwrap(), Theme::Light);
    assert_eq!(kv.get("theme").unwrap().as_deref(), Some("light"));

    let reloaded = open_memory(kv.clone());
    assert_eq!(reloaded.theme(), Theme::Light);

    let mut reloaded = reloaded;
    reloaded.toggle_theme().unwrap();
    assert_eq!(kv.get("theme").unwrap().as_deref(), Some("dark"));
}

#[test]
fn sqlite_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasklist.db");

    let ids = {
        let kv = SqliteKvRepository::open(&path).unwrap();
        let mut service = TaskService::open(
            kv,
            TaskListConfig::default(),
            Box::new(ManualClock::new(1_760_000_000_000)),
        );
        service.add("First", None).unwrap();
        service.add("Second", None).unwrap();
        service.toggle_theme().unwrap();
        service.tasks().iter().map(|t| t.id).collect::<Vec<_>>()
    };

    let kv = SqliteKvRepository::open(&path).unwrap();
    let service = TaskService::new(kv);
    assert_eq!(
        service.tasks().iter().map(|t| t.id).collect::<Vec<_>>(),
        ids
    );
    assert_eq!(service.theme(), Theme::Light);
}

#[test]
fn completed_list_on_startup_does_not_celebrate_again() {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tasklist_core::CelebrationProvider;

    struct Count(Arc<AtomicUsize>);
    impl CelebrationProvider for Count {
        fn confetti(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    let kv = MemoryKvRepository::with_entries([(
        "tasks",
        r#"[{"id":1,"title":"A","done":true},{"id":2,"title":"B","done":true}]"#,
    )]);
    let fired = Arc::new(AtomicUsize::new(0));
    let mut service =
        open_memory(kv).with_celebration_provider(Box::new(Count(Arc::clone(&fired))));

    service.toggle(1, true).unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    service.toggle(1, false).unwrap();
    service.toggle(1, true).unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn write_failure_is_reported_but_keeps_the_change() {
    let surface = TextSurface::new();
    let mut service = TaskService::open(
        ReadOnlyKv,
        TaskListConfig::default(),
        Box::new(ManualClock::new(1_760_000_000_000)),
    )
    .with_surface(Box::new(surface.clone()));
    assert_eq!(surface.frame_count(), 1);

    let err = service.add("Buy milk", None).unwrap_err();
    assert!(matches!(err, TaskServiceError::Store(StoreError::Db(_))));
    assert_eq!(service.tasks().len(), 1);
    assert_eq!(surface.frame_count(), 2);
    assert!(surface.last_frame().contains("Buy milk"));

    let id = service.tasks()[0].id;
    let err = service.toggle(id, true).unwrap_err();
    assert!(matches!(err, TaskServiceError::Store(_)));
    assert!(service.task(id).unwrap().done);
    assert_eq!(surface.frame_count(), 3);
    assert!(surface.last_frame().contains("1/1 done (100%)"));

    let err = service.toggle_theme().unwrap_err();
    assert!(matches!(err, TaskServiceError::Store(_)));
    assert_eq!(service.theme(), Theme::Light);
    assert_eq!(surface.frame_count(), 4);
    assert!(surface.last_frame().starts_with("[light]"));
}
