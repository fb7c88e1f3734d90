//! Task list use-case service.
//!
//! # Responsibility
//! - Own the task list, the undo slot and the transient notice.
//! - Apply every mutation, persist the full list, then re-render.
//!
//! # Invariants
//! - Add and undo never produce a second task with an existing title (exact match).
//! - Only toggle fires the completion celebration.
//! - Task ids are strictly increasing and never reused within a session.
//! - Every mutating call persists before it renders.
//! - Edit does not check for duplicate titles.

use crate::clock::{Clock, SystemClock};
use crate::config::TaskListConfig;
use crate::extension::celebration::{CelebrationProvider, CompletionLatch};
use crate::extension::reorder::ReorderProvider;
use crate::model::counters::Counters;
use crate::model::task::{Task, TaskId};
use crate::model::theme::Theme;
use crate::render::{RenderSurface, TaskListSnapshot, TaskView};
use crate::repo::kv_repo::{KvRepository, StoreError};
use crate::repo::task_list_repo::TaskListRepository;
use crate::service::notice::Notice;
use crate::service::timed_slot::TimedSlot;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TaskResult<T> = Result<T, TaskServiceError>;

/// Service error for task list use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// No task with this id in the list.
    TaskNotFound(TaskId),
    /// Persisting failed. The in-memory change is kept.
    Store(StoreError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::TaskNotFound(_) => None,
        }
    }
}

impl From<StoreError> for TaskServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Result of [`TaskService::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(TaskId),
    /// Title was empty after trimming; nothing changed.
    Empty,
    /// An active task already has this title; a notice was raised.
    Duplicate(String),
}

/// Result of [`TaskService::undo_delete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    Restored(TaskId),
    /// Nothing pending, or the undo window has closed.
    Nothing,
    /// An active task already has the deleted title; a notice was raised and
    /// the pending undo was dropped.
    Duplicate(String),
}

/// Result of [`TaskService::commit_edit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Renamed,
    /// Empty or unchanged input; the edit was discarded.
    Reverted,
}

/// The task list manager.
///
/// One instance is the single source of truth; hosts hold it (or a reference
/// to it) and route every interaction through its methods.
pub struct TaskService<R: KvRepository> {
    repo: TaskListRepository<R>,
    config: TaskListConfig,
    clock: Box<dyn Clock>,
    tasks: Vec<Task>,
    theme: Theme,
    last_issued_id: TaskId,
    editing: Option<TaskId>,
    undo: TimedSlot<Task>,
    notice: TimedSlot<Notice>,
    completion: CompletionLatch,
    focus_input: bool,
    surface: Option<Box<dyn RenderSurface>>,
    reorder: Option<Box<dyn ReorderProvider>>,
    celebration: Option<Box<dyn CelebrationProvider>>,
}

impl<R: KvRepository> TaskService<R> {
    /// Loads state with default config and the system clock.
    pub fn new(kv: R) -> Self {
        Self::open(kv, TaskListConfig::default(), Box::new(SystemClock))
    }

    /// Loads the persisted list and theme.
    ///
    /// Unreadable or corrupt stored state never fails startup: it is logged
    /// and the service starts from an empty list / default theme.
    pub fn open(kv: R, config: TaskListConfig, clock: Box<dyn Clock>) -> Self {
        let repo = TaskListRepository::new(kv, &config);

        let tasks = repo.load_tasks().unwrap_or_else(|err| {
            warn!("event=tasks_load module=service status=fallback reason=unreadable error={err}");
            Vec::new()
        });
        let theme = repo.load_theme().unwrap_or_else(|err| {
            warn!("event=theme_load module=service status=fallback reason=unreadable error={err}");
            Theme::default()
        });

        let last_issued_id = tasks.iter().map(|task| task.id).max().unwrap_or(0);
        let completion = CompletionLatch::new(Counters::from_tasks(&tasks).is_all_done());
        info!(
            "event=service_open module=service status=ok count={} theme={}",
            tasks.len(),
            theme.as_str()
        );

        Self {
            repo,
            config,
            clock,
            tasks,
            theme,
            last_issued_id,
            editing: None,
            undo: TimedSlot::default(),
            notice: TimedSlot::default(),
            completion,
            focus_input: false,
            surface: None,
            reorder: None,
            celebration: None,
        }
    }

    /// Installs the render surface and renders the loaded state once.
    pub fn with_surface(mut self, surface: Box<dyn RenderSurface>) -> Self {
        self.surface = Some(surface);
        self.focus_input = true;
        self.render();
        self
    }

    pub fn with_reorder_provider(mut self, provider: Box<dyn ReorderProvider>) -> Self {
        self.reorder = Some(provider);
        self
    }

    pub fn with_celebration_provider(mut self, provider: Box<dyn CelebrationProvider>) -> Self {
        self.celebration = Some(provider);
        self
    }

    /// Current list in display order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn counters(&self) -> Counters {
        Counters::from_tasks(&self.tasks)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.get(self.clock.now_ms())
    }

    pub fn undo_available(&self) -> bool {
        self.undo.get(self.clock.now_ms()).is_some()
    }

    pub fn reorder_enabled(&self) -> bool {
        self.reorder.is_some()
    }

    /// Appends a new task.
    ///
    /// # Contract
    /// - `title` is trimmed; empty input is a no-op returning `Empty`.
    /// - An exact title match returns `Duplicate` and raises a notice.
    /// - Input focus is requested in every case.
    pub fn add(&mut self, title: &str, due_date: Option<NaiveDate>) -> TaskResult<AddOutcome> {
        self.focus_input = true;
        let title = title.trim();

        if title.is_empty() {
            self.render();
            return Ok(AddOutcome::Empty);
        }

        if self.has_title(title) {
            info!("event=task_add module=service status=rejected reason=duplicate");
            self.raise_duplicate(title);
            return Ok(AddOutcome::Duplicate(title.to_string()));
        }

        let id = self.next_id();
        self.tasks.push(Task {
            id,
            title: title.to_string(),
            done: false,
            due_date,
        });
        info!(
            "event=task_add module=service status=ok task_id={id} total={}",
            self.tasks.len()
        );
        self.commit()?;
        Ok(AddOutcome::Added(id))
    }

    /// Sets the completion flag of one task.
    ///
    /// The only mutation that can fire the celebration.
    pub fn toggle(&mut self, id: TaskId, done: bool) -> TaskResult<()> {
        self.task_mut(id)?.done = done;
        debug!("event=task_toggle module=service status=ok task_id={id} done={done}");
        if self.completion.observe(self.counters().is_all_done()) {
            self.celebrate();
        }
        self.commit()
    }

    /// Puts one task into inline-edit mode.
    pub fn start_edit(&mut self, id: TaskId) -> TaskResult<()> {
        self.index_of(id)?;
        self.editing = Some(id);
        self.render();
        Ok(())
    }

    /// Leaves edit mode without touching the title.
    pub fn cancel_edit(&mut self) {
        if self.editing.take().is_some() {
            self.render();
        }
    }

    /// Applies an inline edit.
    ///
    /// Empty or unchanged input reverts: nothing is persisted, the surface is
    /// re-rendered with the old title.
    pub fn commit_edit(&mut self, id: TaskId, new_title: &str) -> TaskResult<EditOutcome> {
        let new_title = new_title.trim();
        self.editing = None;

        let task = self.task_mut(id)?;
        if new_title.is_empty() || new_title == task.title {
            self.render();
            return Ok(EditOutcome::Reverted);
        }

        task.title = new_title.to_string();
        info!("event=task_edit module=service status=ok task_id={id}");
        self.commit()?;
        Ok(EditOutcome::Renamed)
    }

    /// Removes one task and stages it for undo, replacing any pending undo.
    pub fn delete(&mut self, id: TaskId) -> TaskResult<Task> {
        let index = self.index_of(id)?;
        let removed = self.tasks.remove(index);
        if self.editing == Some(id) {
            self.editing = None;
        }

        self.undo.put(
            removed.clone(),
            self.clock.now_ms(),
            self.config.undo_window_ms,
        );
        info!(
            "event=task_delete module=service status=ok task_id={id} total={}",
            self.tasks.len()
        );
        self.commit()?;
        Ok(removed)
    }

    /// Restores the last deleted task at the end of the list.
    ///
    /// The pending undo is consumed either way. A restore that would
    /// duplicate an active title is rejected the same way as a duplicate add.
    pub fn undo_delete(&mut self) -> TaskResult<UndoOutcome> {
        let Some(task) = self.undo.take(self.clock.now_ms()) else {
            debug!("event=task_undo module=service status=noop");
            return Ok(UndoOutcome::Nothing);
        };

        if self.has_title(&task.title) {
            info!(
                "event=task_undo module=service status=rejected reason=duplicate task_id={}",
                task.id
            );
            self.raise_duplicate(&task.title);
            return Ok(UndoOutcome::Duplicate(task.title));
        }

        let id = task.id;
        self.tasks.push(task);
        info!("event=task_undo module=service status=ok task_id={id}");
        self.commit()?;
        Ok(UndoOutcome::Restored(id))
    }

    /// Moves the task at `from` to position `to`.
    ///
    /// Returns `false` without any side effect when either index is out of
    /// range or both are equal.
    pub fn reorder(&mut self, from: usize, to: usize) -> TaskResult<bool> {
        if !self.move_task(from, to) {
            return Ok(false);
        }
        self.commit()?;
        Ok(true)
    }

    /// Applies every drag reported by the reorder provider, then persists once.
    ///
    /// Returns the number of moves applied; `0` when no provider is installed.
    pub fn sync_reorders(&mut self) -> TaskResult<usize> {
        let Some(provider) = self.reorder.as_mut() else {
            return Ok(0);
        };
        let moves = provider.take_moves();

        let applied = moves
            .into_iter()
            .filter(|mv| self.move_task(mv.old_index, mv.new_index))
            .count();
        if applied > 0 {
            self.commit()?;
        }
        Ok(applied)
    }

    /// Stable-partitions the list into not-done tasks followed by done tasks.
    pub fn sort_by_status(&mut self) -> TaskResult<()> {
        let (mut ordered, done): (Vec<Task>, Vec<Task>) =
            self.tasks.drain(..).partition(|task| !task.done);
        ordered.extend(done);
        self.tasks = ordered;
        debug!("event=task_sort module=service status=ok");
        self.commit()
    }

    /// Removes every done task once `confirm` agrees.
    ///
    /// `confirm` receives the number of tasks about to be removed and is not
    /// called when there is nothing to clear. Returns the removed count.
    pub fn clear_completed<F>(&mut self, confirm: F) -> TaskResult<usize>
    where
        F: FnOnce(usize) -> bool,
    {
        let done_count = self.counters().done_count;
        if done_count == 0 || !confirm(done_count) {
            return Ok(0);
        }

        self.tasks.retain(|task| !task.done);
        if let Some(editing) = self.editing {
            if self.index_of(editing).is_err() {
                self.editing = None;
            }
        }
        info!("event=task_clear_completed module=service status=ok removed={done_count}");
        self.commit()?;
        Ok(done_count)
    }

    /// Flips and persists the theme preference.
    pub fn toggle_theme(&mut self) -> TaskResult<Theme> {
        self.theme = self.theme.toggled();
        let saved = self.repo.save_theme(self.theme);
        self.render();
        saved?;
        Ok(self.theme)
    }

    /// Removes the notice before its deadline.
    pub fn dismiss_notice(&mut self) -> bool {
        let dismissed = self.notice.clear();
        if dismissed {
            self.render();
        }
        dismissed
    }

    /// Expires the undo slot and the notice once their deadlines pass.
    ///
    /// Hosts call this from their timer; it re-renders only when something
    /// expired.
    pub fn tick(&mut self) -> bool {
        let now_ms = self.clock.now_ms();
        let undo_expired = self.undo.expire(now_ms);
        let notice_expired = self.notice.expire(now_ms);
        if undo_expired || notice_expired {
            debug!("event=timers_expire module=service undo={undo_expired} notice={notice_expired}");
            self.render();
            return true;
        }
        false
    }

    /// Builds the view model for the current state.
    pub fn snapshot(&self) -> TaskListSnapshot {
        let today = self.clock.today();
        TaskListSnapshot {
            tasks: self
                .tasks
                .iter()
                .map(|task| TaskView {
                    id: task.id,
                    title: task.title.clone(),
                    done: task.done,
                    due_date: task.due_date,
                    overdue: task.is_overdue(today),
                    editing: self.editing == Some(task.id),
                })
                .collect(),
            counters: self.counters(),
            theme: self.theme,
            notice: self.notice().cloned(),
            undo_available: self.undo_available(),
            reorder_enabled: self.reorder_enabled(),
            focus_input: self.focus_input,
        }
    }

    /// Pushes a full snapshot to the surface, if one is installed.
    pub fn render(&mut self) {
        if self.surface.is_none() {
            self.focus_input = false;
            return;
        }
        let snapshot = self.snapshot();
        if let Some(surface) = self.surface.as_mut() {
            surface.render(&snapshot);
        }
        self.focus_input = false;
    }

    fn commit(&mut self) -> TaskResult<()> {
        self.completion.settle(self.counters().is_all_done());
        let saved = self.repo.save_tasks(&self.tasks);
        if let Err(err) = &saved {
            warn!("event=tasks_save module=service status=error error={err}");
        }
        self.render();
        saved.map_err(TaskServiceError::from)
    }

    fn celebrate(&mut self) {
        info!(
            "event=list_complete module=service status=ok total={} provider={}",
            self.tasks.len(),
            self.celebration.is_some()
        );
        if let Some(provider) = self.celebration.as_mut() {
            provider.play_sound();
            provider.vibrate();
            provider.confetti();
        }
    }

    fn has_title(&self, title: &str) -> bool {
        self.tasks.iter().any(|task| task.title == title)
    }

    fn raise_duplicate(&mut self, title: &str) {
        self.notice.put(
            Notice::duplicate_title(title),
            self.clock.now_ms(),
            self.config.notice_ttl_ms,
        );
        self.render();
    }

    fn move_task(&mut self, from: usize, to: usize) -> bool {
        let len = self.tasks.len();
        if from >= len || to >= len || from == to {
            return false;
        }
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        true
    }

    fn next_id(&mut self) -> TaskId {
        let now_ms = self.clock.now_ms();
        let id = if now_ms > self.last_issued_id {
            now_ms
        } else {
            self.last_issued_id + 1
        };
        self.last_issued_id = id;
        id
    }

    fn index_of(&self, id: TaskId) -> TaskResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskServiceError::TaskNotFound(id))
    }

    fn task_mut(&mut self, id: TaskId) -> TaskResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TaskServiceError::TaskNotFound(id))
    }
}
