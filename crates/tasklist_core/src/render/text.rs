//! Plain-text surface, used by the CLI probe and for inspecting renders.

use super::{RenderSurface, TaskListSnapshot, TaskView};
use std::fmt::Write as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

const EMPTY_STATE_LINE: &str = "No tasks yet. Add one above.";

/// Renders a snapshot as human-readable lines.
pub fn render_text(snapshot: &TaskListSnapshot) -> String {
    let mut out = String::new();
    let counters = snapshot.counters;
    let _ = writeln!(
        out,
        "[{}] {}/{} done ({})",
        snapshot.theme.as_str(),
        counters.done_count,
        counters.total_count,
        counters.done_percent_label()
    );

    if snapshot.is_empty() {
        out.push_str(EMPTY_STATE_LINE);
        out.push('\n');
    }
    for (position, task) in snapshot.tasks.iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}", position + 1, task_line(task));
    }

    if let Some(notice) = &snapshot.notice {
        let _ = writeln!(out, "! {}", notice.message);
    }
    if snapshot.undo_available {
        out.push_str("(undo available)\n");
    }
    out
}

fn task_line(task: &TaskView) -> String {
    let checkbox = if task.done { "[x]" } else { "[ ]" };
    let mut line = if task.editing {
        format!("{checkbox} <edit: {}>", task.title)
    } else {
        format!("{checkbox} {}", task.title)
    };
    if let Some(due) = task.due_date {
        let _ = write!(line, " (due {due}");
        if task.overdue {
            line.push_str(", overdue");
        }
        line.push(')');
    }
    line
}

/// Surface keeping the latest text frame. Clones share the same frame.
#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    last_frame: Arc<Mutex<String>>,
    frames: Arc<AtomicUsize>,
}

impl TextSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> String {
        self.last_frame
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of renders received so far.
    pub fn frame_count(&self) -> usize {
        self.frames.load(Ordering::SeqCst)
    }
}

impl RenderSurface for TextSurface {
    fn render(&mut self, snapshot: &TaskListSnapshot) {
        let frame = render_text(snapshot);
        *self.last_frame.lock().unwrap_or_else(PoisonError::into_inner) = frame;
        self.frames.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::render_text;
    use crate::model::counters::Counters;
    use crate::model::theme::Theme;
    use crate::render::{TaskListSnapshot, TaskView};
    use chrono::NaiveDate;

    fn snapshot(tasks: Vec<TaskView>) -> TaskListSnapshot {
        TaskListSnapshot {
            counters: Counters {
                done_count: tasks.iter().filter(|t| t.done).count(),
                total_count: tasks.len(),
            },
            tasks,
            theme: Theme::Dark,
            notice: None,
            undo_available: false,
            reorder_enabled: false,
            focus_input: false,
        }
    }

    #[test]
    fn empty_list_renders_empty_state() {
        let text = render_text(&snapshot(Vec::new()));
        assert!(text.starts_with("[dark] 0/0 done (0%)"));
        assert!(text.contains("No tasks yet."));
    }

    #[test]
    fn overdue_and_editing_rows_are_marked() {
        let text = render_text(&snapshot(vec![
            TaskView {
                id: 1,
                title: "Pay rent".to_string(),
                done: false,
                due_date: NaiveDate::from_ymd_opt(2026, 1, 1),
                overdue: true,
                editing: false,
            },
            TaskView {
                id: 2,
                title: "Call mom".to_string(),
                done: true,
                due_date: None,
                overdue: false,
                editing: true,
            },
        ]));

        assert!(text.contains("1. [ ] Pay rent (due 2026-01-01, overdue)"));
        assert!(text.contains("2. [x] <edit: Call mom>"));
        assert!(!text.contains("No tasks yet."));
    }
}
