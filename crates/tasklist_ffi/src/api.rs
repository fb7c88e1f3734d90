//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the task list manager to Dart via FRB as one opaque board handle.
//! - Return a full view envelope after every call so the UI can rebuild.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - State lives in the `TaskBoard` handle owned by Dart; there are no
//!   process-wide boards.

use chrono::NaiveDate;
use log::warn;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tasklist_core::config::resolve_db_path;
use tasklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AddOutcome, CelebrationProvider, ChannelReorderProvider, EditOutcome, ReorderReporter,
    SqliteKvRepository, TaskListSnapshot, TaskService, UndoOutcome,
};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItemView {
    pub id: i64,
    pub title: String,
    pub done: bool,
    /// `YYYY-MM-DD` when set.
    pub due_date: Option<String>,
    pub overdue: bool,
    pub editing: bool,
}

/// Full view envelope returned by every board call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// Whether the requested operation succeeded.
    pub ok: bool,
    /// Human-readable result for diagnostics; empty when there is nothing to say.
    pub message: String,
    pub tasks: Vec<TaskItemView>,
    pub done_count: u32,
    pub total_count: u32,
    /// Already formatted, e.g. `"50%"`.
    pub done_percent: String,
    /// Show the empty-state indicator instead of the list.
    pub is_empty: bool,
    pub notice: Option<String>,
    pub undo_available: bool,
    pub reorder_enabled: bool,
    /// `light` or `dark`.
    pub theme: String,
    pub focus_input: bool,
    /// Play sound / haptics / confetti now; set once per completion.
    pub celebrate: bool,
}

/// Celebration provider that hands the cue to Dart through the next view.
struct PendingCelebration(Arc<AtomicBool>);

impl CelebrationProvider for PendingCelebration {
    fn confetti(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

struct BoardState {
    service: TaskService<SqliteKvRepository>,
    reorder: Option<ReorderReporter>,
    celebrate: Arc<AtomicBool>,
}

/// Handle owning one task list manager.
///
/// The mutex only satisfies FRB's `Send + Sync` requirement for opaque types;
/// Dart calls arrive one at a time.
#[flutter_rust_bridge::frb(opaque)]
pub struct TaskBoard {
    state: Mutex<BoardState>,
}

impl TaskBoard {
    /// Opens the board backed by `db_path`, or by `TASKLIST_DB_PATH` / a temp
    /// file when `None`.
    ///
    /// `reorder_supported = false` disables drag-reordering in the view.
    #[flutter_rust_bridge::frb(sync)]
    pub fn open(db_path: Option<String>, reorder_supported: bool) -> Result<TaskBoard, String> {
        let path = db_path
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(std::path::PathBuf::from)
            .unwrap_or_else(resolve_db_path);
        let kv = SqliteKvRepository::open(&path)
            .map_err(|err| format!("board open failed: {err}"))?;

        let celebrate = Arc::new(AtomicBool::new(false));
        let mut service = TaskService::new(kv)
            .with_celebration_provider(Box::new(PendingCelebration(Arc::clone(&celebrate))));
        let mut reorder = None;
        if reorder_supported {
            let (provider, reporter) = ChannelReorderProvider::new();
            service = service.with_reorder_provider(Box::new(provider));
            reorder = Some(reporter);
        }

        Ok(Self {
            state: Mutex::new(BoardState {
                service,
                reorder,
                celebrate,
            }),
        })
    }

    /// Current view without changing anything.
    #[flutter_rust_bridge::frb(sync)]
    pub fn view(&self) -> BoardView {
        self.run(|_| Ok(String::new()))
    }

    /// Adds a task; `due_date` is `YYYY-MM-DD` or empty.
    #[flutter_rust_bridge::frb(sync)]
    pub fn add_task(&self, title: String, due_date: Option<String>) -> BoardView {
        let due_date = match parse_due_date(due_date.as_deref()) {
            Ok(due_date) => due_date,
            Err(message) => return self.fail(message),
        };
        let mut view = self.run(|state| {
            match state.service.add(&title, due_date) {
                Ok(AddOutcome::Added(_)) => Ok("Task added.".to_string()),
                Ok(AddOutcome::Empty) => Ok(String::new()),
                Ok(AddOutcome::Duplicate(_)) => Err("Duplicate title.".to_string()),
                Err(err) => Err(format!("add_task failed: {err}")),
            }
        });
        view.focus_input = true;
        view
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn toggle_task(&self, id: i64, done: bool) -> BoardView {
        self.run(|state| {
            state
                .service
                .toggle(id, done)
                .map(|()| String::new())
                .map_err(|err| format!("toggle_task failed: {err}"))
        })
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn start_edit(&self, id: i64) -> BoardView {
        self.run(|state| {
            state
                .service
                .start_edit(id)
                .map(|()| String::new())
                .map_err(|err| format!("start_edit failed: {err}"))
        })
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn cancel_edit(&self) -> BoardView {
        self.run(|state| {
            state.service.cancel_edit();
            Ok(String::new())
        })
    }

    /// Applies an inline edit; empty or unchanged text reverts.
    #[flutter_rust_bridge::frb(sync)]
    pub fn commit_edit(&self, id: i64, text: String) -> BoardView {
        self.run(|state| match state.service.commit_edit(id, &text) {
            Ok(EditOutcome::Renamed) => Ok("Task renamed.".to_string()),
            Ok(EditOutcome::Reverted) => Ok(String::new()),
            Err(err) => Err(format!("commit_edit failed: {err}")),
        })
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn delete_task(&self, id: i64) -> BoardView {
        self.run(|state| {
            state
                .service
                .delete(id)
                .map(|_| "Task deleted.".to_string())
                .map_err(|err| format!("delete_task failed: {err}"))
        })
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn undo_delete(&self) -> BoardView {
        self.run(|state| match state.service.undo_delete() {
            Ok(UndoOutcome::Restored(_)) => Ok("Task restored.".to_string()),
            Ok(UndoOutcome::Nothing) => Ok("Nothing to undo.".to_string()),
            Ok(UndoOutcome::Duplicate(_)) => Err("Duplicate title.".to_string()),
            Err(err) => Err(format!("undo_delete failed: {err}")),
        })
    }

    /// Reports a finished drag from the UI's drag library.
    ///
    /// Without reorder support this is a no-op that still returns the view.
    #[flutter_rust_bridge::frb(sync)]
    pub fn report_drag(&self, old_index: u32, new_index: u32) -> BoardView {
        self.run(|state| {
            let Some(reporter) = state.reorder.as_ref() else {
                return Ok("Reordering is unavailable.".to_string());
            };
            if !reporter.report(old_index as usize, new_index as usize) {
                warn!(
                    "event=drag_report module=ffi status=error reason=provider_gone old_index={old_index} new_index={new_index}"
                );
            }
            state
                .service
                .sync_reorders()
                .map(|_| String::new())
                .map_err(|err| format!("report_drag failed: {err}"))
        })
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn sort_by_status(&self) -> BoardView {
        self.run(|state| {
            state
                .service
                .sort_by_status()
                .map(|()| String::new())
                .map_err(|err| format!("sort_by_status failed: {err}"))
        })
    }

    /// Clears completed tasks; `confirmed` is the answer of the UI dialog.
    #[flutter_rust_bridge::frb(sync)]
    pub fn clear_completed(&self, confirmed: bool) -> BoardView {
        self.run(|state| {
            state
                .service
                .clear_completed(|_| confirmed)
                .map(|removed| format!("Removed {removed} task(s)."))
                .map_err(|err| format!("clear_completed failed: {err}"))
        })
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn toggle_theme(&self) -> BoardView {
        self.run(|state| {
            state
                .service
                .toggle_theme()
                .map(|_| String::new())
                .map_err(|err| format!("toggle_theme failed: {err}"))
        })
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn dismiss_notice(&self) -> BoardView {
        self.run(|state| {
            state.service.dismiss_notice();
            Ok(String::new())
        })
    }

    /// Timer callback: expires the undo window and the notice.
    #[flutter_rust_bridge::frb(sync)]
    pub fn tick(&self) -> BoardView {
        self.run(|state| {
            state.service.tick();
            Ok(String::new())
        })
    }

    fn run(&self, op: impl FnOnce(&mut BoardState) -> Result<String, String>) -> BoardView {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let (ok, message) = match op(&mut *state) {
            Ok(message) => (true, message),
            Err(message) => {
                warn!("event=board_call module=ffi status=error");
                (false, message)
            }
        };
        let celebrate = state.celebrate.swap(false, Ordering::SeqCst);
        to_board_view(&state.service.snapshot(), ok, message, celebrate)
    }

    fn fail(&self, message: String) -> BoardView {
        let mut view = self.view();
        view.ok = false;
        view.message = message;
        view
    }
}

fn parse_due_date(raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(|err| format!("invalid due date `{value}`: {err}")),
    }
}

fn to_board_view(
    snapshot: &TaskListSnapshot,
    ok: bool,
    message: String,
    celebrate: bool,
) -> BoardView {
    BoardView {
        ok,
        message,
        tasks: snapshot
            .tasks
            .iter()
            .map(|task| TaskItemView {
                id: task.id,
                title: task.title.clone(),
                done: task.done,
                due_date: task.due_date.map(|date| date.format("%Y-%m-%d").to_string()),
                overdue: task.overdue,
                editing: task.editing,
            })
            .collect(),
        done_count: snapshot.counters.done_count as u32,
        total_count: snapshot.counters.total_count as u32,
        done_percent: snapshot.counters.done_percent_label(),
        is_empty: snapshot.is_empty(),
        notice: snapshot.notice.as_ref().map(|notice| notice.message.clone()),
        undo_available: snapshot.undo_available,
        reorder_enabled: snapshot.reorder_enabled,
        theme: snapshot.theme.as_str().to_string(),
        focus_input: snapshot.focus_input,
        celebrate,
    }
}
