//! Task list and theme persistence over a key-value store.
//!
//! # Responsibility
//! - Own the storage keys and the JSON encoding of the task list.
//! - Keep the service layer unaware of the storage backend.
//!
//! # Invariants
//! - The whole list is written on every save; there are no partial writes.
//! - Load then save reproduces the stored text exactly. The one exception is
//!   a legacy blank `"dueDate": ""`: it loads as no due date and is saved
//!   back without the field.
//! - Read paths reject invalid persisted state instead of masking it; masking
//!   is the caller's decision.

use super::kv_repo::{KvRepository, StoreError, StoreResult};
use crate::config::TaskListConfig;
use crate::model::task::Task;
use crate::model::theme::Theme;
use log::debug;

pub struct TaskListRepository<R: KvRepository> {
    kv: R,
    tasks_key: String,
    theme_key: String,
}

impl<R: KvRepository> TaskListRepository<R> {
    pub fn new(kv: R, config: &TaskListConfig) -> Self {
        Self {
            kv,
            tasks_key: config.tasks_key.clone(),
            theme_key: config.theme_key.clone(),
        }
    }

    /// Loads the stored list in saved order.
    ///
    /// A missing key is an empty list. Malformed JSON or an invalid record is
    /// a `StoreError::Codec`.
    pub fn load_tasks(&self) -> StoreResult<Vec<Task>> {
        let Some(raw) = self.kv.get(&self.tasks_key)? else {
            return Ok(Vec::new());
        };
        let tasks: Vec<Task> = serde_json::from_str(&raw).map_err(|source| StoreError::Codec {
            key: self.tasks_key.clone(),
            source,
        })?;
        debug!(
            "event=tasks_load module=repo status=ok count={}",
            tasks.len()
        );
        Ok(tasks)
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> StoreResult<()> {
        let encoded = serde_json::to_string(tasks).map_err(|source| StoreError::Codec {
            key: self.tasks_key.clone(),
            source,
        })?;
        self.kv.set(&self.tasks_key, &encoded)?;
        debug!(
            "event=tasks_save module=repo status=ok count={} bytes={}",
            tasks.len(),
            encoded.len()
        );
        Ok(())
    }

    pub fn load_theme(&self) -> StoreResult<Theme> {
        let stored = self.kv.get(&self.theme_key)?;
        Ok(Theme::from_stored(stored.as_deref()))
    }

    pub fn save_theme(&self, theme: Theme) -> StoreResult<()> {
        self.kv.set(&self.theme_key, theme.as_str())
    }

    /// Underlying store.
    pub fn kv(&self) -> &R {
        &self.kv
    }
}

#[cfg(test)]
mod tests {
    use super::TaskListRepository;
    use crate::config::TaskListConfig;
    use crate::repo::kv_repo::{KvRepository, MemoryKvRepository, StoreError};

    #[test]
    fn missing_key_loads_as_empty_list() {
        let repo = TaskListRepository::new(MemoryKvRepository::new(), &TaskListConfig::default());
        assert!(repo.load_tasks().unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_a_codec_error() {
        let kv = MemoryKvRepository::with_entries([("tasks", "{not json")]);
        let repo = TaskListRepository::new(kv, &TaskListConfig::default());

        let err = repo.load_tasks().unwrap_err();
        assert!(matches!(err, StoreError::Codec { ref key, .. } if key == "tasks"));
    }

    #[test]
    fn blank_due_date_is_dropped_on_save() {
        let kv = MemoryKvRepository::with_entries([(
            "tasks",
            r#"[{"id":1,"title":"a","done":false,"dueDate":""}]"#,
        )]);
        let repo = TaskListRepository::new(kv.clone(), &TaskListConfig::default());

        let tasks = repo.load_tasks().unwrap();
        assert_eq!(tasks[0].due_date, None);
        repo.save_tasks(&tasks).unwrap();
        assert_eq!(
            kv.get("tasks").unwrap().as_deref(),
            Some(r#"[{"id":1,"title":"a","done":false}]"#)
        );
    }

    #[test]
    fn custom_keys_are_respected() {
        let config = TaskListConfig {
            tasks_key: "board.tasks".to_string(),
            ..TaskListConfig::default()
        };
        let kv = MemoryKvRepository::new();
        let repo = TaskListRepository::new(kv.clone(), &config);

        repo.save_tasks(&[]).unwrap();
        assert_eq!(kv.get("board.tasks").unwrap().as_deref(), Some("[]"));
        assert_eq!(kv.get("tasks").unwrap(), None);
    }
}
