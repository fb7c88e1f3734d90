//! Derived progress counters.

use super::task::Task;

/// Read-only progress summary derived from the current list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counters {
    pub done_count: usize,
    pub total_count: usize,
}

impl Counters {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            done_count: tasks.iter().filter(|task| task.done).count(),
            total_count: tasks.len(),
        }
    }

    /// Floor of the done ratio in percent; `0` for an empty list.
    pub fn done_percent(&self) -> u32 {
        if self.total_count == 0 {
            return 0;
        }
        (self.done_count * 100 / self.total_count) as u32
    }

    /// Display form of [`Counters::done_percent`], e.g. `"66%"`.
    pub fn done_percent_label(&self) -> String {
        format!("{}%", self.done_percent())
    }

    /// True only for a non-empty list where every task is done.
    pub fn is_all_done(&self) -> bool {
        self.total_count > 0 && self.done_count == self.total_count
    }
}
