//! Render surface contract and view model.
//!
//! # Responsibility
//! - Define the snapshot handed to a presentation layer after every change.
//! - Keep presentation free of list logic: every flag it needs is precomputed.
//!
//! # Invariants
//! - A render is always a full rebuild from one snapshot; there is no diffing.
//! - Interaction callbacks are keyed by `TaskId`, never by list position.

pub mod text;

use crate::model::counters::Counters;
use crate::model::task::TaskId;
use crate::model::theme::Theme;
use crate::service::notice::Notice;
use chrono::NaiveDate;

pub use text::{render_text, TextSurface};

/// Presentation layer rebuilt from scratch on every change.
pub trait RenderSurface: Send {
    fn render(&mut self, snapshot: &TaskListSnapshot);
}

/// One row of the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
    pub due_date: Option<NaiveDate>,
    /// Incomplete and due before today.
    pub overdue: bool,
    /// Render an inline editable field instead of the title.
    pub editing: bool,
}

/// Everything a surface needs for one full render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListSnapshot {
    pub tasks: Vec<TaskView>,
    pub counters: Counters,
    pub theme: Theme,
    pub notice: Option<Notice>,
    pub undo_available: bool,
    /// False when no reorder provider is installed.
    pub reorder_enabled: bool,
    /// The add input should take focus again.
    pub focus_input: bool,
}

impl TaskListSnapshot {
    /// Show the empty-state indicator instead of the list container.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
