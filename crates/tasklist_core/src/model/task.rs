//! Task domain model.
//!
//! # Responsibility
//! - Define the single persisted entity of the task list.
//! - Own the overdue policy and record-level validation.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused for another task.
//! - `title` is never empty or whitespace-only.
//! - Completed tasks are never overdue.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable task identifier: the creation timestamp in epoch milliseconds.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// One entry of the task list.
///
/// Serialized field order is `id, title, done, dueDate`; `dueDate` is omitted
/// when absent so a load/save cycle reproduces the stored text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub done: bool,
    /// Calendar date only, stored as `YYYY-MM-DD`.
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// Validation errors for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
    NonPositiveId(TaskId),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::NonPositiveId(id) => write!(f, "task id must be positive, got {id}"),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Creates a not-done task after validating id and title.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        due_date: Option<NaiveDate>,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            title: title.into(),
            done: false,
            due_date,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id <= 0 {
            return Err(TaskValidationError::NonPositiveId(self.id));
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Returns whether the task is past due relative to `today`.
    ///
    /// A due date equal to `today` is not overdue yet.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.done && self.due_date.is_some_and(|due| due < today)
    }
}

#[derive(Deserialize)]
struct TaskRecord {
    id: TaskId,
    title: String,
    #[serde(default)]
    done: bool,
    #[serde(rename = "dueDate", default, deserialize_with = "deserialize_due_date")]
    due_date: Option<NaiveDate>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskValidationError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let task = Self {
            id: record.id,
            title: record.title,
            done: record.done,
            due_date: record.due_date,
        };
        task.validate()?;
        Ok(task)
    }
}

// Date inputs left blank are stored as "" by older clients.
fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
